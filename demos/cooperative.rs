//! Cooperative Example - driving a build across many small ticks.
//!
//! Builds a wide tree under a per-tick unit budget, showing that the
//! target container stays untouched while ticks yield, and that the
//! commit happens in one shot at the end.
//!
//! Run with: cargo run --example cooperative

use weft::{Descriptor, MemoryHost, Renderer, StepBudget, TickStatus};

fn main() {
    println!("=== weft Cooperative Example ===\n");

    let mut list = Descriptor::element("ul");
    for i in 1..=10 {
        list = list.child(Descriptor::element("li").attr("n", i).content(format!("item {i}")));
    }

    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.create_container("root");
    renderer.render(list, container);

    let mut tick = 0;
    loop {
        tick += 1;
        let status = renderer
            .tick(&mut StepBudget::new(3))
            .expect("no producers, cannot fail");

        let attached = renderer.host().node(container).children.len();
        println!("tick {tick:>2}: {status:?}, container children: {attached}");

        if status != TickStatus::Yielded {
            break;
        }
    }

    println!("\nCommitted target tree:\n");
    println!("{}", renderer.host().format(container));
}
