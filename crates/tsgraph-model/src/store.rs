//! The type store: arena plus ref registry for one build run.
//!
//! The store is an explicit context object handed to the builder, not
//! global state; independent build runs use independent stores. It is
//! append-only for the duration of a run and has no eviction.

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::nodes::{IntrinsicKind, TypeKind, TypeNode};

/// Arena index of one built type node. "The same node instance" always
/// means "the same `TypeId`".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: Self = Self(0);
    pub const UNKNOWN: Self = Self(1);
    pub const STRING: Self = Self(2);
    pub const NUMBER: Self = Self(3);
    pub const BOOLEAN: Self = Self(4);
    pub const BIGINT: Self = Self(5);
    pub const SYMBOL: Self = Self(6);
    pub const UNIQUE_SYMBOL: Self = Self(7);
    pub const VOID: Self = Self(8);
    pub const UNDEFINED: Self = Self(9);
    pub const NULL: Self = Self(10);
    pub const NEVER: Self = Self(11);
    pub const TRUE: Self = Self(12);
    pub const FALSE: Self = Self(13);
    pub const DATE: Self = Self(14);
    pub const ERROR: Self = Self(15);
    pub const REGEXP: Self = Self(16);
    pub const FUNCTION_OBJECT: Self = Self(17);
    pub const UNSUPPORTED: Self = Self(18);
}

/// Registry integrity violations. Both are fatal: a graph with a ref
/// collision is not safe to hand to consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Attempted to register a node whose ref is empty.
    EmptyRef { name: String },
    /// Attempted to register a second node under an existing ref.
    DuplicateRef { ref_id: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRef { name } => {
                write!(f, "attempting to add type `{name}` with empty ref")
            }
            Self::DuplicateRef { ref_id } => {
                write!(f, "attempting to override ref `{ref_id}`")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Single source of truth for the nodes of one build run.
pub struct TypeStore {
    nodes: Vec<TypeNode>,
    by_ref: IndexMap<String, TypeId, FxBuildHasher>,
}

impl TypeStore {
    /// A fresh store with all intrinsic singletons pre-interned at their
    /// `TypeId` constants.
    pub fn new() -> Self {
        let mut store = Self {
            nodes: Vec::new(),
            by_ref: IndexMap::default(),
        };
        for kind in [
            IntrinsicKind::Any,
            IntrinsicKind::Unknown,
            IntrinsicKind::String,
            IntrinsicKind::Number,
            IntrinsicKind::Boolean,
            IntrinsicKind::BigInt,
            IntrinsicKind::Symbol,
            IntrinsicKind::UniqueSymbol,
            IntrinsicKind::Void,
            IntrinsicKind::Undefined,
            IntrinsicKind::Null,
            IntrinsicKind::Never,
        ] {
            store.alloc(TypeNode::Intrinsic(kind));
        }
        store.alloc(TypeNode::BooleanLiteral(true));
        store.alloc(TypeNode::BooleanLiteral(false));
        store.alloc(TypeNode::Intrinsic(IntrinsicKind::Date));
        store.alloc(TypeNode::Intrinsic(IntrinsicKind::Error));
        store.alloc(TypeNode::Intrinsic(IntrinsicKind::RegExp));
        store.alloc(TypeNode::Intrinsic(IntrinsicKind::FunctionObject));
        store.alloc(TypeNode::Unsupported);
        store
    }

    /// Arena slot for a node with no registered identity (anonymous
    /// shapes, literals, unions, built-in containers).
    pub fn alloc(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Registers a referable node. Insertion-once is a hard invariant:
    /// an empty or already-present ref is an integrity violation, not a
    /// cache miss.
    pub fn add(&mut self, node: TypeNode) -> Result<TypeId, StoreError> {
        let ref_id = match node.ref_id() {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => {
                return Err(StoreError::EmptyRef { name: node.name() });
            }
        };
        if self.by_ref.contains_key(&ref_id) {
            return Err(StoreError::DuplicateRef { ref_id });
        }
        let id = self.alloc(node);
        self.by_ref.insert(ref_id, id);
        Ok(id)
    }

    pub fn node(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.0 as usize]
    }

    pub fn has(&self, ref_id: &str) -> bool {
        self.by_ref.contains_key(ref_id)
    }

    pub fn get(&self, ref_id: &str) -> Option<TypeId> {
        self.by_ref.get(ref_id).copied()
    }

    /// Lookup that must succeed. Panics on a missing ref: after a
    /// completed build every recorded ref exists, so a miss here means
    /// the graph was corrupted or the wrong store was supplied.
    pub fn get_or_fail(&self, ref_id: &str) -> TypeId {
        match self.get(ref_id) {
            Some(id) => id,
            None => panic!("type not found. ref: {ref_id}"),
        }
    }

    /// Number of registered (referable) nodes; intrinsic singletons and
    /// anonymous allocations are not counted.
    pub fn len(&self) -> usize {
        self.by_ref.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ref.is_empty()
    }

    /// Registered nodes matching a predicate, in insertion order.
    pub fn filter(&self, pred: impl Fn(&TypeNode) -> bool) -> Vec<TypeId> {
        self.by_ref
            .values()
            .copied()
            .filter(|&id| pred(self.node(id)))
            .collect()
    }

    pub fn find(&self, pred: impl Fn(&TypeNode) -> bool) -> Option<TypeId> {
        self.by_ref.values().copied().find(|&id| pred(self.node(id)))
    }

    pub fn classes(&self) -> Vec<TypeId> {
        self.filter(|n| n.kind() == TypeKind::Class)
    }

    pub fn interfaces(&self) -> Vec<TypeId> {
        self.filter(|n| n.kind() == TypeKind::Interface)
    }

    pub fn aliases(&self) -> Vec<TypeId> {
        self.filter(|n| n.kind() == TypeKind::Alias)
    }

    pub fn modules(&self) -> Vec<TypeId> {
        self.filter(|n| n.kind() == TypeKind::Module)
    }

    /// Node equality: reference identity by default, overridden for
    /// literals (by value) and functions (matching non-empty ref).
    pub fn same(&self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        match (self.node(a), self.node(b)) {
            (TypeNode::Function(x), TypeNode::Function(y)) => {
                !x.ref_id.is_empty() && x.ref_id == y.ref_id
            }
            (TypeNode::StringLiteral(x), TypeNode::StringLiteral(y)) => x == y,
            (TypeNode::NumberLiteral(x), TypeNode::NumberLiteral(y)) => x == y,
            (TypeNode::BooleanLiteral(x), TypeNode::BooleanLiteral(y)) => x == y,
            _ => false,
        }
    }
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}
