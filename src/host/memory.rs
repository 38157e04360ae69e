//! In-memory target tree.
//!
//! A slab of plain nodes with an HTML-ish formatter. Tests assert on the
//! formatted subtree of a container; demos print it. Nodes created but
//! never attached (an abandoned build) stay in the slab, unreachable from
//! any container - mirroring how a discarded fiber tree's nodes become
//! garbage.

use std::fmt::Write as _;

use slab::Slab;

use crate::types::{Attributes, Value};

use super::Host;

// =============================================================================
// Nodes
// =============================================================================

/// Handle to a node in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One ordered child entry of a [`MemoryNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryChild {
    /// An attached element node.
    Node(NodeId),
    /// An appended text run.
    Text(String),
}

/// One node of the in-memory target tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    /// Element kind the node was created with.
    pub kind: String,
    /// Attributes assigned so far, in assignment order.
    pub attrs: Attributes,
    /// Text content, if set as a whole.
    pub text: Option<String>,
    /// Attached children, in attachment order.
    pub children: Vec<MemoryChild>,
}

// =============================================================================
// MemoryHost
// =============================================================================

/// In-memory [`Host`] implementation.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: Slab<MemoryNode>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> &MemoryNode {
        &self.nodes[id.0]
    }

    /// Number of nodes ever created (attached or not).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Format the subtree under `root` as indented HTML-ish text.
    ///
    /// Deterministic (attribute and child order are preserved), so two
    /// containers hold the same tree iff their formats are equal.
    pub fn format(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.format_node(root, 0, &mut out);
        out
    }

    fn format_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let pad = "  ".repeat(depth);

        let _ = write!(out, "{pad}<{}", node.kind);
        for (name, value) in &node.attrs {
            let _ = write!(out, " {name}=\"{value}\"");
        }

        if node.text.is_none() && node.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");

        if let Some(text) = &node.text {
            let _ = writeln!(out, "{pad}  {text}");
        }
        for child in &node.children {
            match child {
                MemoryChild::Node(child_id) => self.format_node(*child_id, depth + 1, out),
                MemoryChild::Text(text) => {
                    let _ = writeln!(out, "{pad}  {text}");
                }
            }
        }

        let _ = writeln!(out, "{pad}</{}>", node.kind);
    }
}

impl Host for MemoryHost {
    type Node = NodeId;

    fn create_node(&mut self, kind: &str) -> NodeId {
        NodeId(self.nodes.insert(MemoryNode {
            kind: kind.to_string(),
            ..MemoryNode::default()
        }))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &Value) {
        self.nodes[node.0].attrs.insert(name.to_string(), value.clone());
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = Some(text.to_string());
    }

    fn append_text(&mut self, parent: NodeId, text: &str) {
        self.nodes[parent.0]
            .children
            .push(MemoryChild::Text(text.to_string()));
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(MemoryChild::Node(child));
    }
}

// =============================================================================
// Tests
// =============================================================================
