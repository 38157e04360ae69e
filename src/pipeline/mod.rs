//! Build/commit pipeline: budgets, the work loop scheduler, and the
//! commit walker.
//!
//! - [`budget`] - tick allowances ([`Budget`] and its drivers)
//! - [`scheduler`] - [`Renderer`]: `render` seeds, `tick` builds
//!   cooperatively, commit happens once the traversal completes
//! - [`commit`] - the single mutating pass over a finished fiber tree

pub mod budget;
pub mod commit;
pub mod scheduler;

pub use budget::{Budget, FnBudget, StepBudget, TimeBudget, Unbounded};
pub use commit::commit;
pub use scheduler::{Renderer, TickStatus};
