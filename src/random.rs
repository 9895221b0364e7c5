use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of every random draw in the simulation.
///
/// Churn and the person generator take one of these instead of reaching for a
/// process-wide generator, so a run can be replayed from a seed or scripted in tests.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[0, bound)`. `bound` is never zero.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Uniform integer in `[low, high)`.
    fn in_range(&mut self, low: u32, high: u32) -> u32 {
        low + self.next_below(high - low)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// [`RandomSource`] backed by a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> SeededRandom {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> SeededRandom {
        SeededRandom {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }
}

/// Returns whether an event with the given percentage chance happens.
///
/// Percentages outside `[0, 100]` are logged and treated as "does not happen"
/// without consuming a draw.
pub fn chance<R: RandomSource + ?Sized>(rng: &mut R, percent: f64) -> bool {
    if !(0.0..=100.0).contains(&percent) {
        tracing::warn!(percent, "percentage must be between 0 and 100");
        return false;
    }
    rng.next_f64() < percent / 100.0
}
