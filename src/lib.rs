//! # weft
//!
//! Incremental tree reconciliation engine with cooperative scheduling.
//!
//! weft turns an immutable declarative tree of [`Descriptor`]s into
//! mutations on a target tree, in interruptible, resumable units of work
//! ("fibers") rather than one atomic pass.
//!
//! ## Architecture
//!
//! The pipeline is a two-phase build/commit protocol:
//!
//! ```text
//! Descriptor tree → fiber tree (budgeted ticks) → commit walk → Host mutations
//! ```
//!
//! The build phase expands one work unit per step, suspending between
//! units whenever the tick's [`Budget`] runs out; the `child`/`sibling`/
//! `parent` links of the fiber tree are the reified call stack that makes
//! resumption a single cursor load. The target tree is only mutated by the
//! commit walk, which runs exactly once, after the whole fiber tree is
//! built - observers of the target never see a partially-built subtree.
//!
//! ## Modules
//!
//! - [`types`] - scalar values and attribute maps
//! - [`descriptor`] - the immutable input tree and producer contracts
//! - [`host`] - target-tree mutation boundary ([`Host`]) and the
//!   in-memory host
//! - [`engine`] - fibers and the reconciliation step
//! - [`pipeline`] - budgets, the work loop scheduler, the commit walker

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod types;

// Re-export commonly used items
pub use types::{Attributes, Value};

pub use descriptor::{
    Children, Component, ComponentError, ComponentFactory, ComponentFn, Descriptor,
    DescriptorKind,
};

pub use error::RenderError;

pub use host::{Host, MemoryChild, MemoryHost, MemoryNode, NodeId};

pub use engine::{Fiber, FiberId, FiberTree, WorkKind};

pub use pipeline::{
    Budget, FnBudget, Renderer, StepBudget, TickStatus, TimeBudget, Unbounded,
};
