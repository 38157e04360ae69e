//! Descriptor model - the immutable input tree.
//!
//! A [`Descriptor`] says *what* to render: a host element with attributes
//! and children, a raw text/number payload, or a producer (stateless
//! [`ComponentFn`] or stateful [`Component`]) that computes a replacement
//! descriptor instead of owning a target node itself.
//!
//! Descriptors are plain data handed to the engine; the engine never mutates
//! them. Work units take defensive copies of the attribute map and children
//! at expansion time.
//!
//! # Example
//!
//! ```
//! use weft::Descriptor;
//!
//! let page = Descriptor::element("div")
//!     .attr("class", "page")
//!     .child(Descriptor::element("h1").content("Hello"))
//!     .child(Descriptor::element("a").attr("href", "https://example.com"));
//! ```

use std::fmt;
use std::rc::Rc;

use crate::types::{Attributes, Value};

// =============================================================================
// Producers
// =============================================================================

/// Error type producers report render failures with.
///
/// The engine never catches or retries these; they propagate out of the
/// scheduling tick that invoked the producer.
pub type ComponentError = Box<dyn std::error::Error>;

/// A stateless producer: a plain function from attributes to a descriptor.
pub type ComponentFn = Rc<dyn Fn(&Attributes) -> Result<Descriptor, ComponentError>>;

/// A stateful producer instance.
///
/// Instances are constructed scoped to the descriptor's attributes (see
/// [`ComponentFactory`]) and asked to render exactly once per expansion.
/// There is no disposal hook: an instance abandoned with an unfinished
/// build is simply dropped along with the fiber tree.
pub trait Component {
    /// Produce the descriptor this component renders to.
    fn render(&self) -> Result<Descriptor, ComponentError>;
}

/// Constructor for a stateful producer, receiving the attributes the
/// descriptor carried.
pub type ComponentFactory = Rc<dyn Fn(Attributes) -> Box<dyn Component>>;

// =============================================================================
// Descriptor
// =============================================================================

/// The kind of output a descriptor describes.
///
/// This is a closed set: the builder dispatches over it with a single
/// `match` rather than virtual dispatch.
#[derive(Clone)]
pub enum DescriptorKind {
    /// A host element, identified by tag. Materializes into exactly one
    /// target-tree node.
    Element(String),
    /// A stateless producer.
    Function(ComponentFn),
    /// A stateful producer.
    Component(ComponentFactory),
    /// A raw text/number payload (the "absent kind"). Never owns a target
    /// node; its value is written through its host-element ancestor.
    Text(Value),
}

impl fmt::Debug for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(tag) => f.debug_tuple("Element").field(tag).finish(),
            Self::Function(_) => f.write_str("Function"),
            Self::Component(_) => f.write_str("Component"),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
        }
    }
}

/// The reserved `children` slot of a descriptor.
///
/// Distinguishes the bare-payload form (written as the node's text content
/// by the materializer, never expanded) from a list of nested descriptors
/// (each expanded into its own work unit).
#[derive(Clone, Debug)]
pub enum Children {
    /// Zero or more nested descriptors, in render order.
    Nodes(Vec<Descriptor>),
    /// A bare text/number payload.
    Payload(Value),
}

impl Children {
    /// True if there is nothing to expand or write.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Nodes(nodes) if nodes.is_empty())
    }
}

impl Default for Children {
    fn default() -> Self {
        Self::Nodes(Vec::new())
    }
}

/// An immutable declarative node: `{ kind, attrs, children }`.
#[derive(Clone, Debug)]
pub struct Descriptor {
    /// What this descriptor renders as.
    pub kind: DescriptorKind,
    /// Named attributes, excluding the reserved `children` key.
    pub attrs: Attributes,
    /// Nested descriptors or a raw payload.
    pub children: Children,
}

impl Descriptor {
    fn new(kind: DescriptorKind) -> Self {
        Self {
            kind,
            attrs: Attributes::new(),
            children: Children::default(),
        }
    }

    /// A host element descriptor with the given tag.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Element(tag.into()))
    }

    /// A raw text/number payload descriptor.
    pub fn text(value: impl Into<Value>) -> Self {
        Self::new(DescriptorKind::Text(value.into()))
    }

    /// A stateless producer descriptor.
    pub fn function(
        f: impl Fn(&Attributes) -> Result<Descriptor, ComponentError> + 'static,
    ) -> Self {
        Self::new(DescriptorKind::Function(Rc::new(f)))
    }

    /// A stateful producer descriptor.
    ///
    /// The factory runs when the engine expands this descriptor; the
    /// resulting instance is rendered once.
    pub fn component(factory: impl Fn(Attributes) -> Box<dyn Component> + 'static) -> Self {
        Self::new(DescriptorKind::Component(Rc::new(factory)))
    }

    /// Set one attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append one child descriptor.
    ///
    /// A bare payload set earlier via [`content`](Self::content) is
    /// normalized into a one-element descriptor list first.
    pub fn child(mut self, child: Descriptor) -> Self {
        let mut nodes = match std::mem::take(&mut self.children) {
            Children::Nodes(nodes) => nodes,
            Children::Payload(value) => vec![Self::text(value)],
        };
        nodes.push(child);
        self.children = Children::Nodes(nodes);
        self
    }

    /// Append several child descriptors in order.
    pub fn children(mut self, children: impl IntoIterator<Item = Descriptor>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    /// Set the children slot to a bare text/number payload.
    ///
    /// The materializer writes this as the node's text content; it is never
    /// expanded into a child work unit.
    pub fn content(mut self, value: impl Into<Value>) -> Self {
        self.children = Children::Payload(value.into());
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let d = Descriptor::element("div")
            .attr("class", "page")
            .child(Descriptor::element("h1"))
            .child(Descriptor::text("hi"));

        assert!(matches!(&d.kind, DescriptorKind::Element(tag) if tag == "div"));
        assert_eq!(d.attrs.get("class"), Some(&Value::from("page")));
        match &d.children {
            Children::Nodes(nodes) => assert_eq!(nodes.len(), 2),
            Children::Payload(_) => panic!("expected node children"),
        }
    }

    #[test]
    fn test_content_sets_bare_payload() {
        let d = Descriptor::element("p").content("hello");
        assert!(matches!(&d.children, Children::Payload(Value::Str(s)) if s == "hello"));
    }

    #[test]
    fn test_child_after_content_normalizes_payload() {
        let d = Descriptor::element("p")
            .content("a")
            .child(Descriptor::text("b"));

        match &d.children {
            Children::Nodes(nodes) => {
                assert_eq!(nodes.len(), 2);
                assert!(matches!(&nodes[0].kind, DescriptorKind::Text(v) if v.to_string() == "a"));
                assert!(matches!(&nodes[1].kind, DescriptorKind::Text(v) if v.to_string() == "b"));
            }
            Children::Payload(_) => panic!("payload should have been normalized"),
        }
    }

    #[test]
    fn test_function_descriptor_invokes() {
        let d = Descriptor::function(|attrs| {
            Ok(Descriptor::element("span").attr("id", attrs["id"].clone()))
        });

        let DescriptorKind::Function(f) = &d.kind else {
            panic!("expected function kind");
        };
        let mut attrs = Attributes::new();
        attrs.insert("id".to_string(), Value::from("x"));
        let produced = f(&attrs).unwrap();
        assert_eq!(produced.attrs.get("id"), Some(&Value::from("x")));
    }

    #[test]
    fn test_component_descriptor_constructs_and_renders() {
        struct Greeting {
            name: String,
        }

        impl Component for Greeting {
            fn render(&self) -> Result<Descriptor, ComponentError> {
                Ok(Descriptor::element("p").content(self.name.clone()))
            }
        }

        let d = Descriptor::component(|attrs| {
            Box::new(Greeting {
                name: attrs
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
        });

        let DescriptorKind::Component(factory) = &d.kind else {
            panic!("expected component kind");
        };
        let mut attrs = Attributes::new();
        attrs.insert("name".to_string(), Value::from("weft"));
        let produced = factory(attrs).render().unwrap();
        assert!(matches!(&produced.children, Children::Payload(v) if v.to_string() == "weft"));
    }
}
