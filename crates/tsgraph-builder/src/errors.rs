//! Builder error taxonomy.
//!
//! Only integrity violations surface here; they halt the build
//! immediately, because a partial graph is not safe to hand to
//! consumers. Unrepresentable type kinds are not errors — they resolve
//! to the `Unsupported` sentinel and propagate as data.

use std::fmt;

use tsgraph_model::StoreError;
use tsgraph_oracle::TypeFlags;

/// Fatal inconsistency detected while building the graph. Each variant
/// carries enough context to locate the offending declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildError {
    /// Registry rejected a node (empty or colliding ref).
    Store(StoreError),
    /// A non-primitive, non-union type has no symbol to derive an
    /// identity from; treating it as anonymous would merge unrelated
    /// types.
    MissingSymbol { flags: TypeFlags },
    /// The oracle reported a member whose declaration cannot be
    /// located. A node cannot claim a property it cannot describe.
    MissingMemberDeclaration { member: String },
    /// The oracle reported a member without a resolvable type.
    MissingMemberType { member: String },
    /// A decorator expression whose invoked function type cannot be
    /// resolved.
    UnresolvedDecorator { owner: String },
    /// An enum constituent that is not a string or number literal.
    NonLiteralEnumMember { enum_name: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => err.fmt(f),
            Self::MissingSymbol { flags } => {
                write!(f, "type has no symbol to compute an identity from (flags: {flags:?})")
            }
            Self::MissingMemberDeclaration { member } => {
                write!(f, "no declaration found for member `{member}`")
            }
            Self::MissingMemberType { member } => {
                write!(f, "no type found for member `{member}`")
            }
            Self::UnresolvedDecorator { owner } => {
                write!(f, "unsupported decorator expression on `{owner}`")
            }
            Self::NonLiteralEnumMember { enum_name } => {
                write!(f, "enum `{enum_name}` has a non-literal member")
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for BuildError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
