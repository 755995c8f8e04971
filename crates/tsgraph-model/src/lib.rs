//! Type node model for the tsgraph runtime type graph.
//!
//! The model is a tagged enum ([`TypeNode`]) with one variant per kind
//! of type, held in a [`TypeStore`] arena and cross-referenced through
//! memoizing [`Lazy`] producers so that cyclic type definitions build
//! and resolve without infinite recursion.

pub mod lazy;
pub mod members;
pub mod nodes;
pub mod store;

pub use lazy::Lazy;
pub use members::{
    AccessModifier, CallSignature, ClassLocation, ConstructSignature, Decorator, IndexSignature,
    Method, Parameter, Property, Statics,
};
pub use nodes::{
    AliasType, ArrayType, ClassType, EnumType, EnumValue, ExternalType, FunctionType,
    GenericBuiltIn, GenericInstance, InterfaceType, IntersectionType, IntrinsicKind, MapType,
    ModuleExport, ModuleType, ObjectType, PromiseType, SetType, TupleType, TypeKind, TypeNode,
    TypeParameter, UnionType, number_text,
};
pub use store::{StoreError, TypeId, TypeStore};

#[cfg(test)]
mod tests;
