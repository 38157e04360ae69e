//! Engine error taxonomy.
//!
//! There are no retries anywhere: every operation is deterministic given
//! its inputs, so a failed tick stays failed and the caller recovers by
//! starting a fresh render. A failing build never commits - the target
//! tree is only mutated after the whole fiber tree completes.

use thiserror::Error;

use crate::descriptor::ComponentError;

/// Errors surfaced by a scheduling tick.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A producer returned an error during expansion. Aborts the current
    /// tick, leaving the fiber tree partially built and uncommitted.
    #[error("producer failed to render: {0}")]
    Component(ComponentError),

    /// A host-element descriptor carried an empty tag. Caller contract
    /// violation; fails fast.
    #[error("host element descriptor has an empty tag")]
    EmptyTag,

    /// A text-payload descriptor carried children. Caller contract
    /// violation; fails fast.
    #[error("text descriptor cannot carry children")]
    TextWithChildren,
}
