//! Oracle boundary for the tsgraph type graph builder.
//!
//! The static type system is consumed as a black box through the
//! [`TypeOracle`] trait: opaque handles plus flag bitsets, nothing else.
//! [`FixtureOracle`] is a scripted implementation for driving the builder
//! in tests without a compiler front-end behind it.

pub mod fixture;
pub mod flags;
pub mod oracle;

pub use fixture::FixtureOracle;
pub use flags::{ModifierFlags, ObjectFlags, SymbolFlags, TypeFlags};
pub use oracle::{
    DeclDesc, Descriptor, ExportBinding, LiteralValue, SigDesc, SymbolDesc, TypeOracle,
};
