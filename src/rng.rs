//! Seeded pseudo-random number generator for human-like move selection.
//!
//! An owned [`Rng`] value, not global state: each search call that needs
//! randomness constructs one from [`PersonalityParams::random_seed`] so a
//! given seed reproduces the exact same candidate choice every time (used
//! by the temperature-0 determinism guarantee in spec.md §8).
//!
//! [`PersonalityParams::random_seed`]: crate::personality::PersonalityParams::random_seed

use rand::Rng as _;

/// Modulus of the Park-Miller minimal-standard generator: the Mersenne
/// prime 2^31 - 1.
const MODULUS: u64 = 0x7FFF_FFFF;
const MULTIPLIER: u64 = 48_271;

/// A Lehmer (Park-Miller) linear congruential generator. Cheap, has no
/// cryptographic pretensions, and is good enough to break ties between
/// near-equal candidate moves.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Seeds the generator. A seed of 0 draws a fresh seed from the
    /// system's entropy source instead, for ordinary (non-deterministic)
    /// play.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 {
            rand::thread_rng().gen_range(1..=(MODULUS - 1) as u32)
        } else {
            seed
        };
        Rng {
            state: (seed as u64) % MODULUS,
        }
    }

    fn next_u31(&mut self) -> u32 {
        if self.state == 0 {
            self.state = 1;
        }
        self.state = (self.state * MULTIPLIER) % MODULUS;
        self.state as u32
    }

    /// Returns a uniform value in `[0.0, 1.0)`.
    #[must_use]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u31() as f64 / MODULUS as f64
    }

    /// Returns a uniform integer in `[low, high]` (inclusive on both ends).
    #[must_use]
    pub fn gen_range_i32(&mut self, low: i32, high: i32) -> i32 {
        debug_assert!(low <= high);
        let span = (high - low) as u32 + 1;
        low + (self.next_u31() % span) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_is_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        let seq_a: Vec<u32> = (0..10).map(|_| a.next_u31()).collect();
        let seq_b: Vec<u32> = (0..10).map(|_| b.next_u31()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Rng::new(1);
        let mut b = Rng::new(2);
        assert_ne!(a.next_u31(), b.next_u31());
    }

    #[test]
    fn next_f64_stays_in_unit_interval() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn gen_range_respects_bounds() {
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            let x = rng.gen_range_i32(-5, 5);
            assert!((-5..=5).contains(&x));
        }
    }
}
