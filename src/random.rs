//! Injectable randomness for the synthetic series generators.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniform draws used for jitter.
///
/// Production code passes a thread or OS-seeded RNG; tests pass a seeded
/// [`StdRng`] or a [`FixedSource`].
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Draw in `[0, amplitude)`.
    fn uniform(&mut self, amplitude: f64) -> f64 {
        self.next_unit() * amplitude
    }

    /// Draw in `[-amplitude/2, amplitude/2)`.
    fn symmetric(&mut self, amplitude: f64) -> f64 {
        (self.next_unit() - 0.5) * amplitude
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl RandomSource for ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Returns the same draw forever. Useful for pinning jitter in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(f64);

impl FixedSource {
    /// Creates a source that always yields `value`, clamped into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0 - f64::EPSILON))
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Deterministic source for a seed, or an OS-seeded one when `seed` is `None`.
pub fn source_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}
