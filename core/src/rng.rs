//! Random Number Generator.

use crate::pbrt::*;

/// 32-bit precision value for 1 - epsilon.
pub const ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1"); // 0.99999994

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG32 pseudo-random number generator. Each rendering worker owns its own
/// instance; an instance created with `default()` always starts from the same
/// state so results are reproducible.
#[derive(Clone, Debug)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` by seeding it with the given starting sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        let mut ret = Self { state: 0, inc: 0 };
        ret.set_sequence(sequence_index);
        ret
    }

    /// Initialize the random number generator sequence.
    ///
    /// * `init_seq` - The starting sequence to seed with.
    pub fn set_sequence(&mut self, init_seq: u64) {
        self.state = 0;
        self.inc = init_seq.wrapping_shl(1) | 1;
        let _ = self.uniform_u32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        let _ = self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xor_shifted.rotate_right(rot)
    }

    /// Returns a uniformly distributed value in the half open interval
    /// `[lower_bound, upper_bound)`.
    ///
    /// * `lower_bound` - The lower bound.
    /// * `upper_bound` - The upper bound.
    pub fn bounded_uniform_u32(&mut self, lower_bound: u32, upper_bound: u32) -> u32 {
        debug_assert!(lower_bound < upper_bound);
        let b = upper_bound - lower_bound;
        let threshold = b.wrapping_neg() % b;
        loop {
            let r = self.uniform_u32();
            if r >= threshold {
                return lower_bound + r % b;
            }
        }
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    pub fn uniform_float(&mut self) -> Float {
        min(
            self.uniform_u32() as Float * hexf32!("0x1.0p-32"),
            ONE_MINUS_EPSILON,
        )
    }

    /// Returns a uniformly distributed value over `[0, high)`.
    ///
    /// * `high` - Upper bound.
    pub fn uniform(&mut self, high: Float) -> Float {
        self.uniform_range(0.0, high)
    }

    /// Returns a uniformly distributed value over `[low, high)`.
    ///
    /// * `low`  - Lower bound.
    /// * `high` - Upper bound.
    pub fn uniform_range(&mut self, low: Float, high: Float) -> Float {
        let v = low + self.uniform_float() * (high - low);
        // Rounding can land exactly on `high` for wide ranges.
        if v >= high && high > low {
            max(low, next_float_down(high))
        } else {
            v
        }
    }

    /// Randomly permute a slice containing n-dimensional values in a linear
    /// structure.
    ///
    /// * `v`            - The slice to shuffle.
    /// * `count`        - Number n-dimensional values.
    /// * `n_dimensions` - Number of total dimensions.
    pub fn shuffle<T>(&mut self, v: &mut [T], count: usize, n_dimensions: usize) {
        debug_assert!(count * n_dimensions <= v.len());

        for i in 0..count {
            let other = i + self.bounded_uniform_u32(0, (count - i) as u32) as usize;
            for j in 0..n_dimensions {
                v.swap(n_dimensions * i + j, n_dimensions * other + j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_gives_same_sequence() {
        let mut a = RNG::new(42);
        let mut b = RNG::new(42);
        for _ in 0..1000 {
            assert_eq!(a.uniform_float(), b.uniform_float());
        }
    }

    #[test]
    fn default_instances_agree() {
        let mut a = RNG::default();
        let mut b = RNG::default();
        let va: Vec<u32> = (0..64).map(|_| a.uniform_u32()).collect();
        let vb: Vec<u32> = (0..64).map(|_| b.uniform_u32()).collect();
        assert_eq!(va, vb);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RNG::new(1);
        let mut b = RNG::new(2);
        let va: Vec<u32> = (0..8).map(|_| a.uniform_u32()).collect();
        let vb: Vec<u32> = (0..8).map(|_| b.uniform_u32()).collect();
        assert_ne!(va, vb);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = RNG::new(7);
        let mut v: Vec<usize> = (0..100).collect();
        rng.shuffle(&mut v, 100, 1);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn uniform_range_stays_in_half_open_interval(
            seed in 0..10000u64,
            lo in -100.0..100.0f32,
            width in 0.001..100.0f32,
        ) {
            let mut rng = RNG::new(seed);
            let hi = lo + width;
            for _ in 0..32 {
                let v = rng.uniform_range(lo, hi);
                prop_assert!(v >= lo && v < hi, "{} not in [{}, {})", v, lo, hi);
            }
        }

        #[test]
        fn bounded_uniform_u32_stays_in_bounds(seed in 0..10000u64, lo in 0..100u32, w in 1..100u32) {
            let mut rng = RNG::new(seed);
            for _ in 0..32 {
                let v = rng.bounded_uniform_u32(lo, lo + w);
                prop_assert!(v >= lo && v < lo + w);
            }
        }
    }
}
