//! Seeded random sources for noise construction.
//!
//! Every noise generator draws its permutation table and lattice offsets from a
//! [`Random`] so that a world seed fully determines the terrain.

pub mod legacy_random;

pub use legacy_random::LegacyRandom;

/// A deterministic sequential random source.
pub trait Random {
    /// Next uniformly distributed `i32` over the full range.
    fn next_i32(&mut self) -> i32;

    /// Next `i32` in `[0, bound)`. `bound` must be positive.
    fn next_i32_bounded(&mut self, bound: i32) -> i32;

    /// Next uniformly distributed `i64` over the full range.
    fn next_i64(&mut self) -> i64;

    /// Next `f64` in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Advance the state by `count` draws, discarding the results.
    fn consume_count(&mut self, count: u32);
}
