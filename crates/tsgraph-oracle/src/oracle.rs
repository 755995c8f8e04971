//! The `TypeOracle` trait: the narrow boundary between the graph builder
//! and whatever static type system answers questions about types.
//!
//! The builder never inspects source text. Everything it learns about a
//! type arrives through this trait as opaque handles plus flag bitsets,
//! which keeps the builder testable against [`FixtureOracle`](crate::fixture::FixtureOracle)
//! and keeps a real checker front-end swappable behind it.
//!
//! All methods are synchronous and must answer in bounded time; the
//! builder has no suspension points.

use crate::flags::{ModifierFlags, ObjectFlags, SymbolFlags, TypeFlags};

/// Opaque handle denoting one type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Descriptor(pub u32);

/// Opaque handle denoting one symbol (a named entity: member, export,
/// alias, declaration owner).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolDesc(pub u32);

/// Opaque handle denoting one declaration site.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclDesc(pub u32);

/// Opaque handle denoting one call or construct signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SigDesc(pub u32);

/// A literal value carried by a literal type.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

/// Where a class constructor can be loaded from at run time:
/// the emitted file plus the export name binding the class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportBinding {
    pub file_name: String,
    pub export_name: String,
}

/// The static type system, viewed as a black box.
///
/// Handle lifetimes: every handle returned by an oracle stays valid for
/// as long as the oracle itself. The builder holds handles only for the
/// duration of one build call chain.
pub trait TypeOracle {
    // --- classification ---------------------------------------------------

    fn kind_flags(&self, ty: Descriptor) -> TypeFlags;

    /// Object sub-classification; empty for non-object kinds.
    fn object_flags(&self, ty: Descriptor) -> ObjectFlags;

    // --- symbols and declarations -----------------------------------------

    fn symbol_of(&self, ty: Descriptor) -> Option<SymbolDesc>;

    /// The alias symbol, when the type was reached through a
    /// `type X = ...` declaration.
    fn alias_symbol_of(&self, ty: Descriptor) -> Option<SymbolDesc>;

    fn symbol_name(&self, sym: SymbolDesc) -> String;

    fn symbol_flags(&self, sym: SymbolDesc) -> SymbolFlags;

    fn declaration_of(&self, sym: SymbolDesc) -> Option<DeclDesc>;

    /// Path of the module containing the declaration, relative to the
    /// project root. `None` for synthesized declarations.
    fn declaring_module_path(&self, decl: DeclDesc) -> Option<String>;

    fn modifier_flags(&self, decl: DeclDesc) -> ModifierFlags;

    /// Decorator function types applied at this declaration, in source
    /// order. An entry is `None` when the decorator expression's callee
    /// cannot be resolved to a type; builders treat that as fatal.
    fn decorators_of(&self, decl: DeclDesc) -> Vec<Option<Descriptor>>;

    /// How the symbol (a class, typically) is bound in its module's
    /// export surface, if it is exported at all.
    fn export_binding_of(&self, sym: SymbolDesc) -> Option<ExportBinding>;

    // --- structure --------------------------------------------------------

    /// The type of a value symbol at its declaration (member types,
    /// parameter types, function/variable exports).
    fn type_of_symbol(&self, sym: SymbolDesc) -> Option<Descriptor>;

    /// The declared type of a type symbol (the unapplied form for a
    /// generic alias declaration, the instance type for an exported
    /// interface/class).
    fn declared_type_of(&self, sym: SymbolDesc) -> Option<Descriptor>;

    fn properties_of(&self, ty: Descriptor) -> Vec<SymbolDesc>;

    /// Call signatures, excluding overload implementation signatures.
    fn call_signatures_of(&self, ty: Descriptor) -> Vec<SigDesc>;

    fn construct_signatures_of(&self, ty: Descriptor) -> Vec<SigDesc>;

    fn signature_parameters(&self, sig: SigDesc) -> Vec<SymbolDesc>;

    fn signature_return_type(&self, sig: SigDesc) -> Descriptor;

    /// Declared base types: the extends list of an interface, the single
    /// base class of a class.
    fn base_types_of(&self, ty: Descriptor) -> Vec<Descriptor>;

    /// Types named in a class's implements clause.
    fn implemented_types_of(&self, ty: Descriptor) -> Vec<Descriptor>;

    /// Resolved type arguments of a generic reference.
    fn type_arguments_of(&self, ty: Descriptor) -> Vec<Descriptor>;

    /// Type arguments recorded on the alias symbol path.
    fn alias_type_arguments_of(&self, ty: Descriptor) -> Vec<Descriptor>;

    /// Declared type parameters of an interface or class.
    fn type_parameters_of(&self, ty: Descriptor) -> Vec<Descriptor>;

    /// The unapplied generic declaration behind a reference.
    fn target_of(&self, ty: Descriptor) -> Option<Descriptor>;

    /// Members of a union or intersection, in declaration order.
    fn constituents_of(&self, ty: Descriptor) -> Vec<Descriptor>;

    fn literal_value(&self, ty: Descriptor) -> Option<LiteralValue>;

    /// Constraint of a type parameter (`T extends ...`).
    fn constraint_of(&self, ty: Descriptor) -> Option<Descriptor>;

    /// Default of a type parameter (`T = ...`).
    fn default_of(&self, ty: Descriptor) -> Option<Descriptor>;

    fn string_index_type_of(&self, ty: Descriptor) -> Option<Descriptor>;

    fn number_index_type_of(&self, ty: Descriptor) -> Option<Descriptor>;

    /// The static side of a class: the constructor function type owning
    /// construct signatures and static members.
    fn static_side_of(&self, ty: Descriptor) -> Option<Descriptor>;

    /// Exported symbols of a module symbol, in export order.
    fn exports_of(&self, module: SymbolDesc) -> Vec<SymbolDesc>;
}
