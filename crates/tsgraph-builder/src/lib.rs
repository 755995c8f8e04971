//! Recursive construction of a queryable type graph from an oracle.
//!
//! The builder walks type descriptors supplied by a
//! [`TypeOracle`](tsgraph_oracle::TypeOracle), assigns each referable
//! type a stable identity string, and registers deduplicated nodes in a
//! [`TypeStore`](tsgraph_model::TypeStore). Cyclic definitions terminate
//! through an in-flight identity set plus lazy by-reference links.

mod builder;
mod builtins;
mod errors;
mod guard;
mod identity;
mod members;
mod module;

pub use builder::TypeGraphBuilder;
pub use builtins::Boundary;
pub use errors::BuildError;
pub use identity::{calculate as calculate_identity, IdOptions};
pub use module::ModuleWalker;

#[cfg(test)]
mod tests;
