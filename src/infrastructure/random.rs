//! Thread-local RNG adapter
//!
//! Implements `RandomPort` using `rand::thread_rng()`.

use rand::Rng;

use crate::application::ports::outbound::RandomPort;

/// Production random number generator using the thread-local RNG.
#[derive(Debug, Clone, Default)]
pub struct ThreadRngAdapter;

impl ThreadRngAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl RandomPort for ThreadRngAdapter {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_range_bounds() {
        let rng = ThreadRngAdapter::new();
        for _ in 0..200 {
            let value = rng.random_range(1, 6);
            assert!((1..=6).contains(&value), "Value {} out of range", value);
        }
    }
}
