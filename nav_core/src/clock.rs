use std::cell::Cell;
use std::time::Instant;

use crate::utils::traits::{cst, Float};

/// A monotonic seconds-since-epoch clock.
///
/// The compensator only ever reads `now()` to prune its command history and
/// to stamp newly recorded commands, so any monotonic source works,
/// including a deterministic test double.
pub trait Clock<F: Float> {
    fn now(&self) -> F;
}

/// Wraps [`std::time::Instant`], anchored at construction.
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Clock<F> for SystemClock {
    fn now(&self) -> F {
        cst(self.epoch.elapsed().as_secs_f64())
    }
}

/// Returns whatever value was last set with [`ManualClock::advance_to`],
/// defaulting to zero.
pub struct ManualClock<F: Float> {
    now: Cell<F>,
}

impl<F: Float> ManualClock<F> {
    pub fn new(start: F) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance_to(&self, t: F) {
        self.now.set(t);
    }
}

impl<F: Float> Default for ManualClock<F> {
    fn default() -> Self {
        Self::new(F::zero())
    }
}

impl<F: Float> Clock<F> for ManualClock<F> {
    fn now(&self) -> F {
        self.now.get()
    }
}
