//! Time budgets for cooperative ticks.
//!
//! The engine does not know about any particular host yield primitive.
//! A driver hands [`Renderer::tick`](crate::pipeline::Renderer::tick)
//! whatever [`Budget`] fits its world: a wall-clock slice for an idle
//! callback, a fixed unit count for tests and fairness experiments, a
//! closure querying the host's own "time remaining" object, or no limit
//! at all.

use std::time::{Duration, Instant};

/// A tick's remaining work allowance.
///
/// Queried once before each work unit; the scheduler suspends between
/// units as soon as this answers `false`. A budget that starts exhausted
/// yields a tick that processes zero units, which is fine - the traversal
/// cursor does not move.
pub trait Budget {
    /// True while the current tick may process another unit.
    fn has_remaining(&mut self) -> bool;
}

/// Never runs out. One tick with this budget finishes the whole build.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Budget for Unbounded {
    fn has_remaining(&mut self) -> bool {
        true
    }
}

/// Wall-clock slice: allows work until a deadline passes.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    deadline: Instant,
}

impl TimeBudget {
    /// Budget lasting `slice` from now.
    pub fn new(slice: Duration) -> Self {
        Self {
            deadline: Instant::now() + slice,
        }
    }
}

impl Budget for TimeBudget {
    fn has_remaining(&mut self) -> bool {
        Instant::now() < self.deadline
    }
}

/// Fixed number of work units per tick. Deterministic, so tests can split
/// a build into exact slices.
#[derive(Debug, Clone, Copy)]
pub struct StepBudget {
    remaining: usize,
}

impl StepBudget {
    /// Budget allowing exactly `steps` units.
    pub fn new(steps: usize) -> Self {
        Self { remaining: steps }
    }
}

impl Budget for StepBudget {
    fn has_remaining(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Adapter turning any `FnMut() -> bool` query into a [`Budget`], so a
/// host's own "time remaining" object plugs in directly.
pub struct FnBudget<F>(pub F);

impl<F: FnMut() -> bool> Budget for FnBudget<F> {
    fn has_remaining(&mut self) -> bool {
        (self.0)()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_exhausts() {
        let mut budget = Unbounded;
        for _ in 0..1000 {
            assert!(budget.has_remaining());
        }
    }

    #[test]
    fn test_step_budget_counts_down() {
        let mut budget = StepBudget::new(2);
        assert!(budget.has_remaining());
        assert!(budget.has_remaining());
        assert!(!budget.has_remaining());
        assert!(!budget.has_remaining());
    }

    #[test]
    fn test_zero_step_budget_starts_exhausted() {
        let mut budget = StepBudget::new(0);
        assert!(!budget.has_remaining());
    }

    #[test]
    fn test_closure_budget() {
        let mut calls = 0;
        let mut budget = FnBudget(move || {
            calls += 1;
            calls <= 3
        });
        assert!(budget.has_remaining());
        assert!(budget.has_remaining());
        assert!(budget.has_remaining());
        assert!(!budget.has_remaining());
    }

    #[test]
    fn test_expired_time_budget() {
        let mut budget = TimeBudget::new(Duration::ZERO);
        assert!(!budget.has_remaining());
    }
}
