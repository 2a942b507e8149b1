/*!
 * Core Types
 * Common types used across the simulator
 */

use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process ID type
pub type Pid = u32;

/// Size type for partitions and memory requirements
pub type Size = usize;

/// Simulated time, in ticks
pub type Ticks = u32;

/// First pid handed out by a fresh simulator
pub const FIRST_PID: Pid = 100;

/// Closed interval `[min, max]` used for every randomized draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusiveRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> InclusiveRange<T> {
    #[inline]
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: SampleUniform + PartialOrd + Copy> InclusiveRange<T> {
    /// Draw uniformly from the interval, both ends included
    ///
    /// Panics on an empty interval; configuration validation rules that out.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.gen_range(self.min..=self.max)
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

impl<T: fmt::Display> fmt::Display for InclusiveRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
