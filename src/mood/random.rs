//! Random streams consumed by the motion step and the hiss draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A stream of uniform samples.
///
/// The session owns exactly one source and consumes it in a fixed order,
/// so swapping in a deterministic source makes a whole run reproducible.
pub trait RandomSource {
    /// Next sample in `[0, 1]`
    fn next_unit(&mut self) -> f64;

    /// Next sample in `[-1, 1]`
    fn next_signed(&mut self) -> f64 {
        self.next_unit() * 2.0 - 1.0
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_signed(&mut self) -> f64 {
        (**self).next_signed()
    }
}

/// Adapter over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible stream for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..=1.0)
    }

    fn next_signed(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

/// Always yields the same unit sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(f64);

impl ConstantSource {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }
}

impl RandomSource for ConstantSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of unit samples, wrapping around at the end
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
    drawn: usize,
}

impl SequenceSource {
    /// An empty list behaves like a constant zero
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().map(|v| v.clamp(0.0, 1.0)).collect(),
            cursor: 0,
            drawn: 0,
        }
    }

    /// Total number of samples handed out so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        self.drawn += 1;
        let Some(&value) = self.values.get(self.cursor) else {
            return 0.0;
        };
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
