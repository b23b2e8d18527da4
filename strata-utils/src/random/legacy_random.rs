//! The classic 48-bit linear congruential generator.
//!
//! Noise tables built from this source are bit-compatible with terrain tooling
//! that seeds its generators the same way, which is what makes preview columns
//! reproducible across implementations.

use super::Random;

const MULTIPLIER: i64 = 0x0005_DEEC_E66D;
const INCREMENT: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;
/// `2^-53`, the spacing of doubles in `[0.5, 1)`.
const DOUBLE_UNIT: f64 = 1.0 / 9_007_199_254_740_992.0;

/// 48-bit LCG random source.
#[derive(Debug, Clone)]
pub struct LegacyRandom {
    seed: i64,
}

impl LegacyRandom {
    /// Create a generator from a 64-bit seed. Only the low 48 bits are kept,
    /// after scrambling with the multiplier.
    #[must_use]
    pub const fn from_seed(seed: u64) -> Self {
        Self {
            seed: (seed as i64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance the state and return its top `bits` bits.
    #[inline]
    fn next(&mut self, bits: u32) -> i32 {
        self.seed = self
            .seed
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        (self.seed >> (48 - bits)) as i32
    }
}

impl Random for LegacyRandom {
    fn next_i32(&mut self) -> i32 {
        self.next(32)
    }

    fn next_i32_bounded(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive, got {bound}");

        if bound & bound.wrapping_neg() == bound {
            return ((i64::from(bound) * i64::from(self.next(31))) >> 31) as i32;
        }

        loop {
            let bits = self.next(31);
            let value = bits % bound;
            // Reject the tail of the range that would bias small values.
            if bits.wrapping_sub(value).wrapping_add(bound - 1) >= 0 {
                return value;
            }
        }
    }

    fn next_i64(&mut self) -> i64 {
        let high = i64::from(self.next(32));
        let low = i64::from(self.next(32));
        (high << 32).wrapping_add(low)
    }

    fn next_f64(&mut self) -> f64 {
        let high = i64::from(self.next(26));
        let low = i64::from(self.next(27));
        ((high << 27) + low) as f64 * DOUBLE_UNIT
    }

    fn consume_count(&mut self, count: u32) {
        for _ in 0..count {
            self.next(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence() {
        let mut rng = LegacyRandom::from_seed(42);
        assert_eq!(rng.next_i32(), -1_170_105_035);

        let mut rng = LegacyRandom::from_seed(0);
        assert_eq!(rng.next_i64(), -4_962_768_465_676_381_896);

        let mut rng = LegacyRandom::from_seed(0);
        assert!((rng.next_f64() - 0.730_967_787_376_657).abs() < 1e-15);
    }

    #[test]
    fn test_bounded_sequence() {
        let mut rng = LegacyRandom::from_seed(42);
        let values: Vec<i32> = (0..5).map(|_| rng.next_i32_bounded(10)).collect();
        assert_eq!(values, [0, 3, 8, 4, 0]);

        // Power-of-two bounds take the multiply-shift path.
        let mut rng = LegacyRandom::from_seed(42);
        let values: Vec<i32> = (0..5).map(|_| rng.next_i32_bounded(16)).collect();
        assert_eq!(values, [11, 0, 10, 0, 4]);
    }

    #[test]
    fn test_consume_count_advances_state() {
        let mut skipped = LegacyRandom::from_seed(7);
        skipped.consume_count(3);

        let mut stepped = LegacyRandom::from_seed(7);
        for _ in 0..3 {
            stepped.next(1);
        }

        assert_eq!(skipped.next_i32(), stepped.next_i32());
    }

    #[test]
    fn test_f64_range() {
        let mut rng = LegacyRandom::from_seed(123);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
