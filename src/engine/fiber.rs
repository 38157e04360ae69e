//! Work units ("fibers") and the arena they live in.
//!
//! A fiber is the mutable, resumable record for one pending unit of
//! reconciliation work. The `child`/`sibling`/`parent` links reify the
//! call stack as data: the depth-first traversal can stop between any two
//! units and resume from a single [`FiberId`] cursor, with no language
//! stack to unwind or rebuild.
//!
//! Fibers are owned by a [`FiberTree`] arena (slab-backed). Links are plain
//! copyable indices, so `parent` back-references are structurally
//! non-owning and no cycle of ownership can form. Discarding a build
//! session drops the whole arena at once.

use std::fmt;
use std::ops::{Index, IndexMut};

use slab::Slab;

use crate::descriptor::{Children, ComponentFactory, ComponentFn};
use crate::types::{Attributes, Value};

// =============================================================================
// FiberId
// =============================================================================

/// Index of a fiber within its [`FiberTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiberId(usize);

// =============================================================================
// Fiber
// =============================================================================

/// The kind of work a fiber represents. Mirrors
/// [`DescriptorKind`](crate::descriptor::DescriptorKind), plus the synthetic
/// root seeded by the render entry point.
#[derive(Clone)]
pub enum WorkKind {
    /// The synthetic root; its node is the target container.
    Root,
    /// A host element awaiting (or holding) a materialized node.
    Element(String),
    /// A stateless producer.
    Function(ComponentFn),
    /// A stateful producer.
    Component(ComponentFactory),
    /// A raw text/number payload.
    Text(Value),
}

impl fmt::Debug for WorkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("Root"),
            Self::Element(tag) => f.debug_tuple("Element").field(tag).finish(),
            Self::Function(_) => f.write_str("Function"),
            Self::Component(_) => f.write_str("Component"),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
        }
    }
}

/// One work unit.
///
/// `N` is the host's node handle type. `node` is exclusively owned by this
/// fiber once materialized; it stays `None` forever for non-element kinds.
#[derive(Debug)]
pub struct Fiber<N> {
    /// What this unit renders as.
    pub kind: WorkKind,
    /// Defensive copy of the descriptor's attributes.
    pub attrs: Attributes,
    /// Defensive copy of the descriptor's children, consumed when this
    /// unit is processed.
    pub pending: Children,
    /// The materialized target-tree node, if any.
    pub node: Option<N>,
    /// First child work unit.
    pub child: Option<FiberId>,
    /// Next sibling work unit.
    pub sibling: Option<FiberId>,
    /// Non-owning back-reference; `None` only on the root.
    pub parent: Option<FiberId>,
}

impl<N> Fiber<N> {
    /// The synthetic root fiber: owns the container node, pends exactly the
    /// root descriptor.
    pub fn root(container: N, pending: Children) -> Self {
        Self {
            kind: WorkKind::Root,
            attrs: Attributes::new(),
            pending,
            node: Some(container),
            child: None,
            sibling: None,
            parent: None,
        }
    }

    /// A not-yet-processed unit expanded from a descriptor.
    pub fn new(kind: WorkKind, attrs: Attributes, pending: Children, parent: FiberId) -> Self {
        Self {
            kind,
            attrs,
            pending,
            node: None,
            child: None,
            sibling: None,
            parent: Some(parent),
        }
    }
}

// =============================================================================
// FiberTree
// =============================================================================

/// Arena owning every fiber of one build session.
#[derive(Debug)]
pub struct FiberTree<N> {
    fibers: Slab<Fiber<N>>,
}

impl<N> FiberTree<N> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { fibers: Slab::new() }
    }

    /// Insert a fiber, returning its id.
    pub fn insert(&mut self, fiber: Fiber<N>) -> FiberId {
        FiberId(self.fibers.insert(fiber))
    }

    /// Number of fibers allocated so far.
    pub fn len(&self) -> usize {
        self.fibers.len()
    }

    /// True if no fiber has been allocated.
    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }
}

impl<N> Default for FiberTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<FiberId> for FiberTree<N> {
    type Output = Fiber<N>;

    fn index(&self, id: FiberId) -> &Fiber<N> {
        &self.fibers[id.0]
    }
}

impl<N> IndexMut<FiberId> for FiberTree<N> {
    fn index_mut(&mut self, id: FiberId) -> &mut Fiber<N> {
        &mut self.fibers[id.0]
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_owns_container() {
        let tree: FiberTree<u32> = {
            let mut tree = FiberTree::new();
            tree.insert(Fiber::root(7, Children::default()));
            tree
        };
        let root = &tree[FiberId(0)];

        assert_eq!(root.node, Some(7));
        assert!(root.parent.is_none());
        assert!(matches!(root.kind, WorkKind::Root));
    }

    #[test]
    fn test_links_are_plain_indices() {
        let mut tree: FiberTree<u32> = FiberTree::new();
        let root = tree.insert(Fiber::root(0, Children::default()));
        let child = tree.insert(Fiber::new(
            WorkKind::Element("div".to_string()),
            Attributes::new(),
            Children::default(),
            root,
        ));

        tree[root].child = Some(child);

        assert_eq!(tree[child].parent, Some(root));
        assert_eq!(tree[root].child, Some(child));
        assert_eq!(tree.len(), 2);
    }
}
