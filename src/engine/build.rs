//! Fiber tree builder - the reconciliation step proper.
//!
//! [`process`] handles exactly one work unit: materialize it if it is a
//! host element, resolve its children (invoking producers where needed),
//! link each child into the sibling chain, and hand back the next unit
//! under the depth-first rule. One call per unit per tick; the scheduler
//! never suspends inside a unit.
//!
//! Producer descriptors unwrap transparently, one layer per processing
//! step: a producer returning another producer just yields a single child
//! unit that the next step expands in turn.

use log::trace;

use crate::descriptor::{Children, Descriptor, DescriptorKind};
use crate::error::RenderError;
use crate::host::Host;
use crate::types::Attributes;

use super::fiber::{Fiber, FiberId, FiberTree, WorkKind};

// =============================================================================
// Node Materializer
// =============================================================================

/// Create the target-tree node for a host element and apply its statics.
///
/// Every attribute is assigned directly; a bare text/number payload in the
/// children slot becomes the node's text content instead of recursing.
/// Exactly one node creation, not yet attached anywhere - attachment is the
/// commit walker's job.
fn materialize<H: Host>(
    host: &mut H,
    tag: &str,
    attrs: &Attributes,
    pending: &Children,
) -> Result<H::Node, RenderError> {
    if tag.is_empty() {
        return Err(RenderError::EmptyTag);
    }

    let node = host.create_node(tag);
    for (name, value) in attrs {
        host.set_attribute(node, name, value);
    }
    if let Children::Payload(value) = pending {
        host.set_text(node, &value.to_string());
    }
    Ok(node)
}

// =============================================================================
// Fiber Tree Builder
// =============================================================================

/// Process one work unit and return the next one to process.
///
/// Returns `Ok(None)` once the depth-first traversal is exhausted. Producer
/// failures propagate out unchanged; the unit is left unexpanded.
pub fn process<H: Host>(
    tree: &mut FiberTree<H::Node>,
    host: &mut H,
    unit: FiberId,
) -> Result<Option<FiberId>, RenderError> {
    let kind = tree[unit].kind.clone();

    let children: Vec<Descriptor> = match kind {
        WorkKind::Root => take_pending_nodes(tree, unit),
        WorkKind::Element(tag) => {
            if tree[unit].node.is_none() {
                let fiber = &tree[unit];
                let node = materialize(host, &tag, &fiber.attrs, &fiber.pending)?;
                tree[unit].node = Some(node);
            }
            take_pending_nodes(tree, unit)
        }
        WorkKind::Function(render) => {
            let produced = render(&tree[unit].attrs).map_err(RenderError::Component)?;
            vec![produced]
        }
        WorkKind::Component(factory) => {
            let instance = factory(tree[unit].attrs.clone());
            let produced = instance.render().map_err(RenderError::Component)?;
            vec![produced]
        }
        WorkKind::Text(_) => {
            if !tree[unit].pending.is_empty() {
                return Err(RenderError::TextWithChildren);
            }
            Vec::new()
        }
    };

    trace!("processed unit {unit:?}: {} children", children.len());
    link_children(tree, unit, children);
    Ok(next_unit(tree, unit))
}

/// Take the unit's pending children for expansion.
///
/// A bare payload expands to nothing: the materializer already wrote it as
/// text content, it never becomes a separate work unit.
fn take_pending_nodes<N>(tree: &mut FiberTree<N>, unit: FiberId) -> Vec<Descriptor> {
    match std::mem::take(&mut tree[unit].pending) {
        Children::Nodes(nodes) => nodes,
        Children::Payload(_) => Vec::new(),
    }
}

/// Allocate a fiber per child descriptor, in order, linked as
/// `first child -> sibling -> sibling ...` under `parent`.
fn link_children<N>(tree: &mut FiberTree<N>, parent: FiberId, children: Vec<Descriptor>) {
    let mut previous: Option<FiberId> = None;

    for descriptor in children {
        let kind = match descriptor.kind {
            DescriptorKind::Element(tag) => WorkKind::Element(tag),
            DescriptorKind::Function(f) => WorkKind::Function(f),
            DescriptorKind::Component(factory) => WorkKind::Component(factory),
            DescriptorKind::Text(value) => WorkKind::Text(value),
        };
        let id = tree.insert(Fiber::new(
            kind,
            descriptor.attrs,
            descriptor.children,
            parent,
        ));

        match previous {
            None => tree[parent].child = Some(id),
            Some(prev) => tree[prev].sibling = Some(id),
        }
        previous = Some(id);
    }
}

/// Depth-first successor: first child if any, else the first sibling found
/// walking parent links upward, else `None` (traversal complete).
pub fn next_unit<N>(tree: &FiberTree<N>, from: FiberId) -> Option<FiberId> {
    if let Some(child) = tree[from].child {
        return Some(child);
    }

    let mut current = Some(from);
    while let Some(id) = current {
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

#[cfg(test)]
mod tests {
    use crate::descriptor::Descriptor;
    use crate::host::MemoryHost;

    use super::*;

    /// Seed a session root the way the entry point does.
    fn seed(host: &mut MemoryHost, root: Descriptor) -> (FiberTree<crate::host::NodeId>, FiberId) {
        let container = host.create_node("root");
        let mut tree = FiberTree::new();
        let root_id = tree.insert(Fiber::root(container, Children::Nodes(vec![root])));
        (tree, root_id)
    }

    /// Drive the builder to completion, returning the visit order.
    fn drain(
        tree: &mut FiberTree<crate::host::NodeId>,
        host: &mut MemoryHost,
        start: FiberId,
    ) -> Vec<FiberId> {
        let mut visited = Vec::new();
        let mut cursor = Some(start);
        while let Some(unit) = cursor {
            visited.push(unit);
            cursor = process(tree, host, unit).unwrap();
        }
        visited
    }

    #[test]
    fn test_element_materializes_once_with_attributes() {
        let mut host = MemoryHost::new();
        let d = Descriptor::element("div").attr("class", "page");
        let (mut tree, root) = seed(&mut host, d);

        let div_unit = process(&mut tree, &mut host, root).unwrap().unwrap();
        process(&mut tree, &mut host, div_unit).unwrap();

        let node = tree[div_unit].node.expect("element must own a node");
        assert_eq!(host.node(node).kind, "div");
        assert_eq!(host.node(node).attrs.get("class").unwrap().to_string(), "page");
        // Created, but not attached to the container yet.
        assert!(host.node(tree[root].node.unwrap()).children.is_empty());
    }

    #[test]
    fn test_bare_payload_becomes_text_content_not_a_unit() {
        let mut host = MemoryHost::new();
        let d = Descriptor::element("p").content("hello");
        let (mut tree, root) = seed(&mut host, d);

        let p_unit = process(&mut tree, &mut host, root).unwrap().unwrap();
        let next = process(&mut tree, &mut host, p_unit).unwrap();

        assert_eq!(next, None, "payload must not expand into a child unit");
        let node = tree[p_unit].node.unwrap();
        assert_eq!(host.node(node).text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_children_linked_in_order() {
        let mut host = MemoryHost::new();
        let d = Descriptor::element("ul")
            .child(Descriptor::element("li").attr("n", 1))
            .child(Descriptor::element("li").attr("n", 2))
            .child(Descriptor::element("li").attr("n", 3));
        let (mut tree, root) = seed(&mut host, d);

        let ul = process(&mut tree, &mut host, root).unwrap().unwrap();
        process(&mut tree, &mut host, ul).unwrap();

        let first = tree[ul].child.unwrap();
        let second = tree[first].sibling.unwrap();
        let third = tree[second].sibling.unwrap();
        assert!(tree[third].sibling.is_none());
        for (i, id) in [first, second, third].into_iter().enumerate() {
            assert_eq!(tree[id].parent, Some(ul));
            assert_eq!(tree[id].attrs["n"].to_string(), (i + 1).to_string());
        }
    }

    #[test]
    fn test_traversal_is_preorder_depth_first() {
        // root -> a(b(c), d), e   visits a, b, c, d, e
        let mut host = MemoryHost::new();
        let d = Descriptor::element("a")
            .child(Descriptor::element("b").child(Descriptor::element("c")))
            .child(Descriptor::element("d"));
        let root_d = Descriptor::element("top")
            .child(d)
            .child(Descriptor::element("e"));
        let (mut tree, root) = seed(&mut host, root_d);

        let visited = drain(&mut tree, &mut host, root);
        let tags: Vec<String> = visited
            .into_iter()
            .map(|id| match &tree[id].kind {
                WorkKind::Root => "root".to_string(),
                WorkKind::Element(tag) => tag.clone(),
                other => panic!("unexpected kind {other:?}"),
            })
            .collect();

        assert_eq!(tags, ["root", "top", "a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_producer_unwraps_one_layer_per_step() {
        let mut host = MemoryHost::new();
        let d = Descriptor::function(|_| {
            Ok(Descriptor::function(|_| Ok(Descriptor::element("div"))))
        });
        let (mut tree, root) = seed(&mut host, d);

        let outer = process(&mut tree, &mut host, root).unwrap().unwrap();
        let inner = process(&mut tree, &mut host, outer).unwrap().unwrap();
        assert!(matches!(tree[inner].kind, WorkKind::Function(_)));
        assert!(tree[outer].node.is_none(), "producers never own a node");

        let element = process(&mut tree, &mut host, inner).unwrap().unwrap();
        assert!(matches!(&tree[element].kind, WorkKind::Element(tag) if tag == "div"));
    }

    #[test]
    fn test_stateful_producer_constructed_from_attributes() {
        use crate::descriptor::{Component, ComponentError};

        struct Badge {
            label: String,
        }

        impl Component for Badge {
            fn render(&self) -> Result<Descriptor, ComponentError> {
                Ok(Descriptor::element("span").content(self.label.clone()))
            }
        }

        let mut host = MemoryHost::new();
        let d = Descriptor::component(|attrs| {
            Box::new(Badge {
                label: attrs["label"].to_string(),
            })
        })
        .attr("label", "new");
        let (mut tree, root) = seed(&mut host, d);

        let unit = process(&mut tree, &mut host, root).unwrap().unwrap();
        let span = process(&mut tree, &mut host, unit).unwrap().unwrap();
        process(&mut tree, &mut host, span).unwrap();

        let node = tree[span].node.unwrap();
        assert_eq!(host.node(node).text.as_deref(), Some("new"));
    }

    #[test]
    fn test_producer_error_propagates() {
        let mut host = MemoryHost::new();
        let d = Descriptor::function(|_| Err("boom".into()));
        let (mut tree, root) = seed(&mut host, d);

        let unit = process(&mut tree, &mut host, root).unwrap().unwrap();
        let err = process(&mut tree, &mut host, unit).unwrap_err();

        assert!(matches!(err, RenderError::Component(_)));
        assert!(tree[unit].child.is_none(), "failed unit stays unexpanded");
    }

    #[test]
    fn test_empty_tag_fails_fast() {
        let mut host = MemoryHost::new();
        let (mut tree, root) = seed(&mut host, Descriptor::element(""));

        let unit = process(&mut tree, &mut host, root).unwrap().unwrap();
        let err = process(&mut tree, &mut host, unit).unwrap_err();
        assert!(matches!(err, RenderError::EmptyTag));
    }

    #[test]
    fn test_text_with_children_fails_fast() {
        let mut host = MemoryHost::new();
        let malformed = Descriptor::text("a").child(Descriptor::element("div"));
        let (mut tree, root) = seed(&mut host, malformed);

        let unit = process(&mut tree, &mut host, root).unwrap().unwrap();
        let err = process(&mut tree, &mut host, unit).unwrap_err();
        assert!(matches!(err, RenderError::TextWithChildren));
    }
}
