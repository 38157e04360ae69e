//! Commit walker - the single mutating pass.
//!
//! Runs exactly once per build session, after the traversal is exhausted.
//! Walks the finished fiber tree pre-order over the reified links (no
//! recursion, same shape as the build traversal) and attaches every
//! materialized node under the nearest ancestor that owns one. Producer
//! fibers are transparent: only their descendants ever reach the target
//! tree. Text fibers own no node; their payload is appended as an ordered
//! text run on the same nearest ancestor.

use log::debug;

use crate::engine::{FiberId, FiberTree, WorkKind};
use crate::host::Host;

/// Attach the whole fiber tree under the root's container.
///
/// `root` must be the synthetic root fiber; its `node` is the container
/// and every parent walk bottoms out there, which is what makes
/// attach-before-create structurally impossible.
pub fn commit<H: Host>(tree: &FiberTree<H::Node>, host: &mut H, root: FiberId) {
    debug!("committing fiber tree ({} units)", tree.len());

    let mut cursor = tree[root].child;
    while let Some(unit) = cursor {
        attach(tree, host, unit);
        cursor = successor(tree, unit, root);
    }
}

/// Attach one fiber's output under its nearest materialized ancestor.
fn attach<H: Host>(tree: &FiberTree<H::Node>, host: &mut H, unit: FiberId) {
    let fiber = &tree[unit];

    if let Some(node) = fiber.node {
        let parent = nearest_materialized_ancestor(tree, unit);
        host.append_child(parent, node);
    } else if let WorkKind::Text(value) = &fiber.kind {
        let parent = nearest_materialized_ancestor(tree, unit);
        host.append_text(parent, &value.to_string());
    }
    // Producer fibers: passthrough.
}

/// Walk `parent` links to the first fiber owning a node.
fn nearest_materialized_ancestor<N: Copy>(tree: &FiberTree<N>, unit: FiberId) -> N {
    let mut current = tree[unit].parent;
    while let Some(id) = current {
        if let Some(node) = tree[id].node {
            return node;
        }
        current = tree[id].parent;
    }
    unreachable!("the synthetic root always owns the container node");
}

/// Pre-order successor bounded to the subtree under `root`.
fn successor<N>(tree: &FiberTree<N>, from: FiberId, root: FiberId) -> Option<FiberId> {
    if let Some(child) = tree[from].child {
        return Some(child);
    }

    let mut current = Some(from);
    while let Some(id) = current {
        if id == root {
            return None;
        }
        if let Some(sibling) = tree[id].sibling {
            return Some(sibling);
        }
        current = tree[id].parent;
    }
    None
}

// =============================================================================
// Tests
// =============================================================================
