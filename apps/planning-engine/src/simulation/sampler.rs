//! Uniform random sources for the challenge simulator.

use rand::Rng;
use rand::rngs::ThreadRng;

/// Fixed point avoided by the xorshift state, also the splitmix64 increment.
const SEED_SCRAMBLE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Source of uniform samples in `[0, 1)`.
///
/// The simulator is written against this capability so a deterministic
/// seeded source can replace the production one without touching simulation
/// logic.
pub trait UniformSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// Deterministic xorshift64 source for reproducible runs.
#[derive(Debug, Clone)]
pub struct XorShiftSource {
    state: u64,
}

impl XorShiftSource {
    /// Create a source from a seed.
    ///
    /// Zero is a fixed point of xorshift64, so it is remapped to a non-zero
    /// constant.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        let state = if seed == 0 { SEED_SCRAMBLE } else { seed };
        Self { state }
    }

    /// Derive an independent stream for one trial of a seeded run.
    ///
    /// Mixing through splitmix64 keeps trial streams decorrelated even
    /// though trial indices are consecutive, and makes a seeded run
    /// reproducible regardless of how trials are scheduled.
    #[must_use]
    pub const fn for_trial(master_seed: u64, trial: u64) -> Self {
        Self::new(splitmix64(
            master_seed ^ trial.wrapping_mul(SEED_SCRAMBLE),
        ))
    }

    /// Generate next random number (xorshift64).
    const fn next_random(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl UniformSource for XorShiftSource {
    fn next_uniform(&mut self) -> f64 {
        // Top 53 bits fill a double mantissa exactly
        #[allow(clippy::cast_precision_loss)]
        let numerator = (self.next_random() >> 11) as f64;
        numerator / (1u64 << 53) as f64
    }
}

const fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(SEED_SCRAMBLE);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Non-deterministic source backed by the thread-local generator.
#[derive(Debug, Clone)]
pub struct ThreadRngSource {
    rng: ThreadRng,
}

impl Default for ThreadRngSource {
    fn default() -> Self {
        Self { rng: rand::rng() }
    }
}

impl UniformSource for ThreadRngSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = XorShiftSource::new(12345);
        let mut b = XorShiftSource::new(12345);

        for _ in 0..100 {
            assert_eq!(a.next_uniform(), b.next_uniform());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = XorShiftSource::new(1);
        let mut b = XorShiftSource::new(2);

        let same = (0..10).all(|_| a.next_uniform() == b.next_uniform());
        assert!(!same, "distinct seeds should produce distinct streams");
    }

    #[test]
    fn test_samples_stay_in_unit_interval() {
        let mut source = XorShiftSource::new(987);

        for _ in 0..10_000 {
            let sample = source.next_uniform();
            assert!((0.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut source = XorShiftSource::new(0);

        // An all-zero state would emit zeros forever
        assert!(source.next_uniform() != source.next_uniform());
    }

    #[test]
    fn test_trial_streams_are_independent() {
        let mut first = XorShiftSource::for_trial(42, 0);
        let mut second = XorShiftSource::for_trial(42, 1);

        let same = (0..10).all(|_| first.next_uniform() == second.next_uniform());
        assert!(!same, "consecutive trials should not share a stream");
    }

    #[test]
    fn test_thread_rng_source_in_unit_interval() {
        let mut source = ThreadRngSource::default();

        for _ in 0..1000 {
            let sample = source.next_uniform();
            assert!((0.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_samples_spread_across_interval() {
        let mut source = XorShiftSource::new(7);
        let mut below_half = 0u32;

        let total = 10_000;
        for _ in 0..total {
            if source.next_uniform() < 0.5 {
                below_half += 1;
            }
        }

        // Crude uniformity check, far looser than statistical bounds
        assert!(below_half > 4_000 && below_half < 6_000);
    }
}
