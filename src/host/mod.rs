//! Target-tree boundary.
//!
//! The engine never touches a concrete target tree directly; all mutation
//! goes through the [`Host`] trait. Only two components are permitted to
//! call it: the node materializer (`create_node`, `set_attribute`,
//! `set_text`) during the build phase, and the commit walker
//! (`append_child`, `append_text`) during the single commit pass.
//!
//! [`MemoryHost`] is the crate's own implementation, used by tests and
//! demos. A DOM, widget-toolkit, or terminal host is the same trait
//! implemented downstream.

mod memory;

pub use memory::{MemoryChild, MemoryHost, MemoryNode, NodeId};

use std::fmt;

use crate::types::Value;

/// Mutation primitives of a target tree.
///
/// Operations are infallible: attaching to a node that does not exist yet
/// is prevented structurally by the engine (commit only walks materialized
/// ancestors), not handled reactively here.
pub trait Host {
    /// Handle to one target-tree node.
    type Node: Copy + Eq + fmt::Debug;

    /// Create a new, detached node of the given element kind.
    fn create_node(&mut self, kind: &str) -> Self::Node;

    /// Assign one attribute/property on a node.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &Value);

    /// Set a node's text content (the bare-payload form of `children`).
    fn set_text(&mut self, node: Self::Node, text: &str);

    /// Append an ordered text run under a parent node.
    ///
    /// This is the ordered counterpart of [`set_text`](Self::set_text):
    /// text payloads that appear *between* sibling descriptors commit
    /// through their nearest materialized ancestor in render order.
    fn append_text(&mut self, parent: Self::Node, text: &str);

    /// Append a previously created node under a parent node.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);
}
