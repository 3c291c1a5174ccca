//! Random number generation port for the dice engine.
//!
//! Dice draws go through this port so tests can feed fixed faces and
//! production can use the thread RNG.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of uniform integers.
///
/// - `ThreadRngAdapter` in infrastructure (production)
/// - `MockRandomPort` via mockall (testing)
/// - `FixedRandomPort` for deterministic rolls
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Generate a random i32 in range [min, max] (inclusive on both ends)
    fn random_range(&self, min: i32, max: i32) -> i32;
}

/// Fixed random port for deterministic testing.
///
/// Returns values from a provided sequence, cycling if needed.
#[derive(Debug)]
pub struct FixedRandomPort {
    values: Vec<i32>,
    index: AtomicUsize,
}

impl FixedRandomPort {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }

    /// How many values have been drawn so far
    pub fn draws(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

impl RandomPort for FixedRandomPort {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        if self.values.is_empty() {
            return min;
        }
        self.values[idx % self.values.len()].clamp(min, max)
    }
}
