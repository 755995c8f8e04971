//! Members of object-like types: properties, methods, parameters,
//! call/construct signatures, index signatures and decorators.

use crate::lazy::Lazy;
use crate::store::TypeStore;

/// Access level of a class or interface member.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessModifier {
    Public,
    Protected,
    Private,
}

/// A decorator applied to a class, member or parameter.
///
/// The decorator is represented by the type of the decorating function,
/// so "is this member decorated with X" is answered by type equality
/// rather than by name.
#[derive(Clone, Debug)]
pub struct Decorator {
    pub function: Lazy,
}

impl Decorator {
    pub fn is(&self, store: &TypeStore, function: crate::TypeId) -> bool {
        store.same(self.function.get(store), function)
    }
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    pub ty: Lazy,
    pub optional: bool,
    pub decorators: Vec<Decorator>,
}

impl Parameter {
    /// Value equality: same optionality and equal types. Names do not
    /// participate; `(x: string)` and `(y: string)` are the same shape.
    pub fn equals(&self, store: &TypeStore, other: &Parameter) -> bool {
        self.optional == other.optional && store.same(self.ty.get(store), other.ty.get(store))
    }
}

/// One call signature of a function or method. Overloaded callables
/// carry more than one.
#[derive(Clone, Debug)]
pub struct CallSignature {
    pub parameters: Vec<Parameter>,
    pub return_type: Lazy,
}

impl CallSignature {
    /// Value equality: equal return types and pairwise-equal parameters.
    pub fn equals(&self, store: &TypeStore, other: &CallSignature) -> bool {
        if !store.same(self.return_type.get(store), other.return_type.get(store)) {
            return false;
        }
        if self.parameters.len() != other.parameters.len() {
            return false;
        }
        self.parameters
            .iter()
            .zip(&other.parameters)
            .all(|(a, b)| a.equals(store, b))
    }
}

/// Construct signatures share the call signature shape; they differ only
/// in where they attach (a type's constructors list).
pub type ConstructSignature = CallSignature;

#[derive(Clone, Debug)]
pub struct Property {
    pub name: String,
    pub ty: Lazy,
    pub access: AccessModifier,
    pub has_getter: bool,
    pub has_setter: bool,
    /// Declared `readonly`, or has a getter without a setter.
    pub read_only: bool,
    pub optional: bool,
    pub decorators: Vec<Decorator>,
}

#[derive(Clone, Debug)]
pub struct Method {
    pub name: String,
    pub access: AccessModifier,
    /// More than one signature means the method is overloaded.
    pub signatures: Vec<CallSignature>,
    pub decorators: Vec<Decorator>,
}

impl Method {
    pub fn is_overloaded(&self) -> bool {
        self.signatures.len() > 1
    }
}

/// `[key: K]: V` on an object-like type.
#[derive(Clone, Debug)]
pub struct IndexSignature {
    pub key: Lazy,
    pub value: Lazy,
}

/// Static side of a class.
#[derive(Clone, Debug, Default)]
pub struct Statics {
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
}

/// Where a class constructor is reachable at run time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassLocation {
    pub file_name: String,
    pub export_name: String,
}
