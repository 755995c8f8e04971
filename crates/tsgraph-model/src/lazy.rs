//! Deferred type resolution.
//!
//! Every node attribute that points at another node is stored as a
//! [`Lazy`] producer rather than a direct `TypeId`. This is what makes
//! cyclic graphs constructible: while a node is still being built, a
//! back-reference to it is recorded as a by-ref store lookup and only
//! resolved after the node has been registered.

use once_cell::unsync::OnceCell;

use crate::store::TypeStore;
use crate::TypeId;

#[derive(Clone, Debug)]
enum Source {
    /// The target node already exists.
    Built(TypeId),
    /// Deferred lookup of a registered (or in-flight) identity.
    ByRef(String),
}

/// A zero-argument producer of a type node, memoized on first access.
///
/// Resolution needs the store that the graph was built into. A by-ref
/// producer whose identity never got registered indicates a builder bug
/// and panics via [`TypeStore::get_or_fail`]; a completed build
/// guarantees every recorded ref exists.
#[derive(Clone, Debug)]
pub struct Lazy {
    source: Source,
    cell: OnceCell<TypeId>,
}

impl Lazy {
    pub fn built(id: TypeId) -> Self {
        Self {
            source: Source::Built(id),
            cell: OnceCell::new(),
        }
    }

    pub fn by_ref(ref_id: impl Into<String>) -> Self {
        Self {
            source: Source::ByRef(ref_id.into()),
            cell: OnceCell::new(),
        }
    }

    /// Resolves (and memoizes) the target node.
    pub fn get(&self, store: &TypeStore) -> TypeId {
        *self.cell.get_or_init(|| match &self.source {
            Source::Built(id) => *id,
            Source::ByRef(ref_id) => store.get_or_fail(ref_id),
        })
    }

    /// The identity this producer defers to, when it is a by-ref lookup.
    pub fn pending_ref(&self) -> Option<&str> {
        match &self.source {
            Source::ByRef(ref_id) if self.cell.get().is_none() => Some(ref_id),
            _ => None,
        }
    }
}

impl From<TypeId> for Lazy {
    fn from(id: TypeId) -> Self {
        Lazy::built(id)
    }
}
