//! Work loop scheduler and render entry point.
//!
//! A [`Renderer`] owns the host and the single live build session. The
//! session's cursor plus the fiber links are the entire resumption state:
//! a tick can stop between any two work units and a later tick continues
//! from exactly the same place, in the same deterministic pre-order.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use weft::{Descriptor, MemoryHost, Renderer, TickStatus, TimeBudget};
//!
//! let mut renderer = Renderer::new(MemoryHost::new());
//! let container = renderer.create_container("root");
//! renderer.render(Descriptor::element("div").content("hello"), container);
//!
//! // Drive cooperatively...
//! while let TickStatus::Yielded =
//!     renderer.tick(&mut TimeBudget::new(Duration::from_millis(4))).unwrap()
//! {
//!     // other pending work runs here between ticks
//! }
//!
//! // ...or in one unbounded tick:
//! renderer.render(Descriptor::element("div"), container);
//! renderer.run().unwrap();
//! ```

use log::{debug, trace};

use crate::descriptor::{Children, Descriptor};
use crate::engine::{process, Fiber, FiberId, FiberTree};
use crate::error::RenderError;
use crate::host::Host;

use super::budget::{Budget, Unbounded};
use super::commit::commit;

// =============================================================================
// Build Session
// =============================================================================

/// The in-progress build: arena, synthetic root, traversal cursor.
///
/// Single-writer: only [`Renderer::tick`] moves the cursor, and only
/// through [`process`]'s return value.
struct Session<N> {
    tree: FiberTree<N>,
    root: FiberId,
    cursor: Option<FiberId>,
}

/// Outcome of one scheduling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// No build session is live; nothing to do.
    Idle,
    /// The budget ran out with work still pending. The driver must tick
    /// again; the target tree has not been touched.
    Yielded,
    /// The traversal completed and the whole tree was committed in this
    /// tick. The session is cleared.
    Committed,
}

// =============================================================================
// Renderer
// =============================================================================

/// Owns a [`Host`] and at most one live build session.
pub struct Renderer<H: Host> {
    host: H,
    session: Option<Session<H::Node>>,
}

impl<H: Host> Renderer<H> {
    /// Wrap a host.
    pub fn new(host: H) -> Self {
        Self {
            host,
            session: None,
        }
    }

    /// Observe the target tree (e.g. between ticks in tests).
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Give the host back, dropping any unfinished session.
    pub fn into_host(self) -> H {
        self.host
    }

    /// True while a build session has work pending.
    pub fn has_pending_work(&self) -> bool {
        self.session.is_some()
    }

    /// Create a node on the host directly; a convenience for obtaining a
    /// container to render into.
    pub fn create_container(&mut self, kind: &str) -> H::Node {
        self.host.create_node(kind)
    }

    /// Seed a new build session for `root` inside `container`.
    ///
    /// Does not build or commit anything - the next [`tick`](Self::tick)
    /// picks the session up. Any unfinished previous session is discarded
    /// wholesale: its fiber arena (and the detached nodes it materialized)
    /// simply become unreachable, with no cancellation signal to producer
    /// state.
    pub fn render(&mut self, root: Descriptor, container: H::Node) {
        if self.session.is_some() {
            debug!("discarding unfinished build session");
        }

        let mut tree = FiberTree::new();
        let root_id = tree.insert(Fiber::root(container, Children::Nodes(vec![root])));

        debug!("seeded build session at {root_id:?}");
        self.session = Some(Session {
            tree,
            root: root_id,
            cursor: Some(root_id),
        });
    }

    /// Run one cooperative tick: process work units while the budget
    /// allows and units remain, then either yield or commit.
    ///
    /// Suspension only happens between units; a single unit's processing
    /// is atomic. A producer error aborts the tick and leaves the session
    /// partially built and uncommitted; recovery is a fresh
    /// [`render`](Self::render).
    pub fn tick(&mut self, budget: &mut impl Budget) -> Result<TickStatus, RenderError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(TickStatus::Idle);
        };

        let mut processed = 0usize;
        while let Some(unit) = session.cursor {
            if !budget.has_remaining() {
                trace!("budget exhausted after {processed} units; yielding");
                return Ok(TickStatus::Yielded);
            }
            session.cursor = process(&mut session.tree, &mut self.host, unit)?;
            processed += 1;
        }
        trace!("traversal complete after {processed} units this tick");

        // Build finished: commit once, then clear the session.
        if let Some(done) = self.session.take() {
            commit(&done.tree, &mut self.host, done.root);
        }
        Ok(TickStatus::Committed)
    }

    /// Drive the current session to completion in one unbounded tick.
    pub fn run(&mut self) -> Result<TickStatus, RenderError> {
        self.tick(&mut Unbounded)
    }
}

// =============================================================================
// Tests
// =============================================================================
