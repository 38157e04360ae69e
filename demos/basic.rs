//! Basic Example - descriptors, producers, and a one-shot render.
//!
//! This example demonstrates the three descriptor kinds:
//! - host elements with attributes and children
//! - a stateless producer (plain function of its attributes)
//! - a stateful producer (constructed from attributes, then rendered)
//!
//! Run with: cargo run --example basic

use weft::{Component, ComponentError, Descriptor, MemoryHost, Renderer, Value};

/// Stateless producer: wraps its `name` attribute in a paragraph.
fn function_card(attrs: &weft::Attributes) -> Result<Descriptor, ComponentError> {
    let name = attrs
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("anonymous");
    Ok(Descriptor::element("div")
        .attr("class", "function")
        .child(Descriptor::element("p").content(format!("function component: {name}"))))
}

/// Stateful producer: holds the attributes it was constructed with.
struct ClassCard {
    name: String,
}

impl Component for ClassCard {
    fn render(&self) -> Result<Descriptor, ComponentError> {
        Ok(Descriptor::element("div")
            .attr("class", "class")
            .child(Descriptor::element("p").content(format!("class component: {}", self.name))))
    }
}

fn main() {
    println!("=== weft Basic Example ===\n");

    let page = Descriptor::element("div")
        .attr("class", "page")
        .child(Descriptor::element("h1").content("hand-rolled renderer"))
        .child(
            Descriptor::element("a")
                .attr("href", "https://example.com")
                .content("a link"),
        )
        .child(Descriptor::function(function_card).attr("name", "function"))
        .child(
            Descriptor::component(|attrs| {
                Box::new(ClassCard {
                    name: attrs
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                })
            })
            .attr("name", "class"),
        );

    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.create_container("root");

    renderer.render(page, container);
    renderer.run().expect("producers in this demo never fail");

    println!("Committed target tree:\n");
    println!("{}", renderer.host().format(container));
}
