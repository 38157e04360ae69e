//! Reconciliation engine: the fiber arena and the tree builder.
//!
//! - [`fiber`] - work-unit records and the slab arena that owns them
//! - [`build`] - `process(unit) -> next`, one resumable step at a time

pub mod build;
pub mod fiber;

pub use build::{next_unit, process};
pub use fiber::{Fiber, FiberId, FiberTree, WorkKind};
