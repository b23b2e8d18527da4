//! This module contains math related utilities.
pub mod noise_math;

pub use noise_math::{clamped_lerp, floor, lerp, lerp2, lerp3, smoothstep};
