//! The tagged type node model: one variant per kind of type.
//!
//! Nodes are created once per unique identity, registered in the
//! [`TypeStore`](crate::store::TypeStore), and never mutated afterwards;
//! lazy fields settle to a fixed value on first read.

use once_cell::unsync::OnceCell;

use crate::lazy::Lazy;
use crate::members::{
    CallSignature, ClassLocation, ConstructSignature, Decorator, IndexSignature, Method, Property,
    Statics,
};
use crate::store::TypeStore;
use crate::TypeId;

/// Discriminant for [`TypeNode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Intrinsic,
    StringLiteral,
    NumberLiteral,
    BooleanLiteral,
    Object,
    Interface,
    Class,
    Alias,
    GenericInstance,
    Function,
    Union,
    Intersection,
    Tuple,
    Enum,
    External,
    TypeParameter,
    Array,
    Map,
    Set,
    Promise,
    GenericBuiltIn,
    Module,
    Unsupported,
}

/// Interned singleton types: intrinsics plus the opaque host-object
/// built-ins that carry no structure of their own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntrinsicKind {
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    UniqueSymbol,
    Void,
    Undefined,
    Null,
    Never,
    Date,
    Error,
    RegExp,
    /// Any value of type `Function`.
    FunctionObject,
}

impl IntrinsicKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Symbol => "symbol",
            Self::UniqueSymbol => "unique symbol",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Never => "never",
            Self::Date => "Date",
            Self::Error => "Error",
            Self::RegExp => "RegExp",
            Self::FunctionObject => "Function",
        }
    }
}

/// Canonical display text of a number literal: integral values print
/// without a fraction, as they do in source.
pub fn number_text(value: f64) -> String {
    // i128 holds every integral f64 below 1e21 exactly; an i64 cast
    // would saturate above 2^63 and merge distinct literals.
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e21 {
        format!("{}", value as i128)
    } else {
        format!("{value}")
    }
}

#[derive(Clone, Debug)]
pub struct ObjectType {
    pub name: String,
    /// Empty for anonymous structural shapes, which are never registered.
    pub ref_id: String,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub constructors: Vec<ConstructSignature>,
    pub call_signatures: Vec<CallSignature>,
    pub index_signatures: Vec<IndexSignature>,
}

#[derive(Clone, Debug)]
pub struct InterfaceType {
    pub name: String,
    pub ref_id: String,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    /// Lazily resolved extends list.
    pub extends: Vec<Lazy>,
    pub constructors: Vec<ConstructSignature>,
    pub call_signatures: Vec<CallSignature>,
    pub type_parameters: Vec<Lazy>,
    pub index_signatures: Vec<IndexSignature>,
}

#[derive(Clone, Debug)]
pub struct ClassType {
    pub name: String,
    pub ref_id: String,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    /// Single base class, when one exists.
    pub super_type: Option<Lazy>,
    pub implements: Vec<Lazy>,
    pub type_parameters: Vec<Lazy>,
    /// Where the constructor can be loaded from for later instantiation.
    pub location: Option<ClassLocation>,
    pub constructors: Vec<ConstructSignature>,
    pub decorators: Vec<Decorator>,
    pub statics: Statics,
    pub index_signatures: Vec<IndexSignature>,
}

#[derive(Clone, Debug)]
pub struct AliasType {
    pub name: String,
    pub ref_id: String,
    /// The aliased value.
    pub value: Lazy,
    pub type_parameters: Vec<Lazy>,
    /// The unapplied generic form, when the alias was built applied.
    pub generic_alias: Option<Lazy>,
}

/// A generic declaration applied to concrete type arguments — distinct
/// from the unapplied declaration itself.
#[derive(Clone, Debug)]
pub struct GenericInstance {
    pub name: String,
    pub ref_id: String,
    /// Members recomputed under substitution.
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    /// The generic type this instantiates.
    pub generic: Lazy,
    pub type_arguments: Vec<Lazy>,
    pub constructors: Vec<ConstructSignature>,
    pub index_signatures: Vec<IndexSignature>,
}

#[derive(Clone, Debug)]
pub struct FunctionType {
    pub name: String,
    pub ref_id: String,
    pub signatures: Vec<CallSignature>,
}

#[derive(Clone, Debug)]
pub struct UnionType {
    members: Vec<Lazy>,
    resolved: OnceCell<Vec<TypeId>>,
}

impl UnionType {
    pub fn new(members: Vec<Lazy>) -> Self {
        Self {
            members,
            resolved: OnceCell::new(),
        }
    }

    /// Member types, in declaration order. A `true`/`false` pair is
    /// reduced to the single `boolean` member on first read.
    pub fn members(&self, store: &TypeStore) -> &[TypeId] {
        self.resolved.get_or_init(|| {
            let mut ids: Vec<TypeId> = self.members.iter().map(|m| m.get(store)).collect();
            if ids.contains(&TypeId::TRUE) && ids.contains(&TypeId::FALSE) {
                ids.retain(|&id| id != TypeId::TRUE && id != TypeId::FALSE);
                ids.push(TypeId::BOOLEAN);
            }
            ids
        })
    }

    /// Whether the union contains the given type. The `true` and `false`
    /// singletons are contained by a union holding `boolean`.
    pub fn contains(&self, store: &TypeStore, ty: TypeId) -> bool {
        let members = self.members(store);
        if members.iter().any(|&m| store.same(m, ty)) {
            return true;
        }
        (ty == TypeId::TRUE || ty == TypeId::FALSE) && members.contains(&TypeId::BOOLEAN)
    }
}

#[derive(Clone, Debug)]
pub struct IntersectionType {
    pub members: Vec<Lazy>,
}

impl IntersectionType {
    pub fn members(&self, store: &TypeStore) -> Vec<TypeId> {
        self.members.iter().map(|m| m.get(store)).collect()
    }
}

#[derive(Clone, Debug)]
pub struct TupleType {
    pub members: Vec<Lazy>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnumValue {
    Str(String),
    Num(f64),
}

#[derive(Clone, Debug)]
pub struct EnumType {
    pub name: String,
    pub ref_id: String,
    pub values: Vec<EnumValue>,
}

/// Stub for a type declared outside the analyzed project; no structural
/// detail is collected.
#[derive(Clone, Debug)]
pub struct ExternalType {
    pub name: String,
    pub ref_id: String,
}

#[derive(Clone, Debug)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<Lazy>,
    pub default: Option<Lazy>,
}

#[derive(Clone, Debug)]
pub struct ArrayType {
    pub element: Lazy,
}

#[derive(Clone, Debug)]
pub struct MapType {
    pub key: Lazy,
    pub value: Lazy,
}

#[derive(Clone, Debug)]
pub struct SetType {
    pub element: Lazy,
}

#[derive(Clone, Debug)]
pub struct PromiseType {
    pub value: Lazy,
}

/// Iterator/Generator-family host containers that are kept generic
/// rather than flattened to structural objects.
#[derive(Clone, Debug)]
pub struct GenericBuiltIn {
    pub name: String,
    pub type_arguments: Vec<Lazy>,
}

#[derive(Clone, Debug)]
pub struct ModuleExport {
    pub name: String,
    pub ty: Lazy,
}

/// Pseudo-type representing one source module and its export surface.
#[derive(Clone, Debug)]
pub struct ModuleType {
    pub ref_id: String,
    pub file_name: String,
    pub exports: Vec<ModuleExport>,
    pub default_export: Option<Lazy>,
}

#[derive(Clone, Debug)]
pub enum TypeNode {
    Intrinsic(IntrinsicKind),
    StringLiteral(String),
    NumberLiteral(f64),
    /// `true` and `false` are interned singletons.
    BooleanLiteral(bool),
    Object(ObjectType),
    Interface(InterfaceType),
    Class(ClassType),
    Alias(AliasType),
    GenericInstance(GenericInstance),
    Function(FunctionType),
    Union(UnionType),
    Intersection(IntersectionType),
    Tuple(TupleType),
    Enum(EnumType),
    External(ExternalType),
    TypeParameter(TypeParameter),
    Array(ArrayType),
    Map(MapType),
    Set(SetType),
    Promise(PromiseType),
    GenericBuiltIn(GenericBuiltIn),
    Module(ModuleType),
    /// Sentinel for type expressions the model cannot reify. First-class
    /// data, not an error.
    Unsupported,
}

impl TypeNode {
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Intrinsic(_) => TypeKind::Intrinsic,
            Self::StringLiteral(_) => TypeKind::StringLiteral,
            Self::NumberLiteral(_) => TypeKind::NumberLiteral,
            Self::BooleanLiteral(_) => TypeKind::BooleanLiteral,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Class(_) => TypeKind::Class,
            Self::Alias(_) => TypeKind::Alias,
            Self::GenericInstance(_) => TypeKind::GenericInstance,
            Self::Function(_) => TypeKind::Function,
            Self::Union(_) => TypeKind::Union,
            Self::Intersection(_) => TypeKind::Intersection,
            Self::Tuple(_) => TypeKind::Tuple,
            Self::Enum(_) => TypeKind::Enum,
            Self::External(_) => TypeKind::External,
            Self::TypeParameter(_) => TypeKind::TypeParameter,
            Self::Array(_) => TypeKind::Array,
            Self::Map(_) => TypeKind::Map,
            Self::Set(_) => TypeKind::Set,
            Self::Promise(_) => TypeKind::Promise,
            Self::GenericBuiltIn(_) => TypeKind::GenericBuiltIn,
            Self::Module(_) => TypeKind::Module,
            Self::Unsupported => TypeKind::Unsupported,
        }
    }

    /// Display name. Not unique; identity lives in [`TypeNode::ref_id`].
    pub fn name(&self) -> String {
        match self {
            Self::Intrinsic(k) => k.name().to_string(),
            Self::StringLiteral(s) => s.clone(),
            Self::NumberLiteral(n) => number_text(*n),
            Self::BooleanLiteral(b) => b.to_string(),
            Self::Object(o) => o.name.clone(),
            Self::Interface(i) => i.name.clone(),
            Self::Class(c) => c.name.clone(),
            Self::Alias(a) => a.name.clone(),
            Self::GenericInstance(g) => g.name.clone(),
            Self::Function(f) => f.name.clone(),
            Self::Union(_) => "Union".to_string(),
            Self::Intersection(_) => "Intersection".to_string(),
            Self::Tuple(_) => "Tuple".to_string(),
            Self::Enum(e) => e.name.clone(),
            Self::External(e) => e.name.clone(),
            Self::TypeParameter(t) => t.name.clone(),
            Self::Array(_) => "Array".to_string(),
            Self::Map(_) => "Map".to_string(),
            Self::Set(_) => "Set".to_string(),
            Self::Promise(_) => "Promise".to_string(),
            Self::GenericBuiltIn(g) => g.name.clone(),
            Self::Module(m) => m.file_name.clone(),
            Self::Unsupported => "unsupported".to_string(),
        }
    }

    /// The stable identity string, for referable variants with one.
    pub fn ref_id(&self) -> Option<&str> {
        let ref_id = match self {
            Self::Object(o) => &o.ref_id,
            Self::Interface(i) => &i.ref_id,
            Self::Class(c) => &c.ref_id,
            Self::Alias(a) => &a.ref_id,
            Self::GenericInstance(g) => &g.ref_id,
            Self::Function(f) => &f.ref_id,
            Self::Enum(e) => &e.ref_id,
            Self::External(e) => &e.ref_id,
            Self::Module(m) => &m.ref_id,
            _ => return None,
        };
        Some(ref_id.as_str())
    }
}
