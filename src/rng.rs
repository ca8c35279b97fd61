//! Random-source capability used by every generator in the game.
//!
//! Game logic never touches a concrete RNG. It asks a [`RandomSource`] for
//! uniform draws, so tests can substitute a seeded or fully scripted source.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform random draws.
pub trait RandomSource {
    /// A uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// A uniform integer in `[low, high]`. Callers guarantee `low <= high`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32;
}

/// Production source backed by `SmallRng`.
pub struct SeededSource {
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed list of unit draws, then repeats the last one.
///
/// Integer draws are derived from the next unit value the same way a
/// `floor(unit * span)` mapping would, which makes it easy to aim at a
/// specific letter, digit or rare kind.
#[cfg(test)]
pub struct ScriptedSource {
    values: std::collections::VecDeque<f64>,
    last: f64,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            last: 0.0,
        }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            values: std::collections::VecDeque::new(),
            last: value,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn unit(&mut self) -> f64 {
        if let Some(v) = self.values.pop_front() {
            self.last = v;
        }
        self.last
    }

    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let span = (high - low + 1) as f64;
        let offset = (self.unit() * span) as u32;
        (low + offset).min(high)
    }
}
