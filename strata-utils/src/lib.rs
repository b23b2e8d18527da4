//! Shared building blocks for the strata terrain preview.
//!
//! - [`math`] - interpolation and flooring helpers used by the noise code
//! - [`random`] - the seeded random source every noise generator is built from
//! - [`noise`] - gradient noise octaves and the octave-stacked noise field

pub mod math;
pub mod noise;
pub mod random;
