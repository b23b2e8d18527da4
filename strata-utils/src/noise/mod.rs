//! Noise generation primitives for terrain density sampling.
//!
//! - [`ImprovedNoise`] - a single gradient-noise octave
//! - [`PerlinNoise`] - a stack of octaves over an inclusive octave range
//! - [`NoiseField`] - the interface the density sampler consumes, so that
//!   samplers can be driven by instrumented or synthetic fields in tests

mod improved_noise;
mod perlin_noise;

pub use improved_noise::ImprovedNoise;
pub use perlin_noise::{PerlinNoise, wrap};

/// Gradient vectors for the lattice corners, indexed by the low 4 hash bits.
pub(crate) const GRADIENT: [[i32; 3]; 16] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
    [1, 1, 0],
    [0, -1, 1],
    [-1, 1, 0],
    [0, -1, -1],
];

/// A seeded scalar noise field decomposed into independent octaves.
///
/// Octave `0` is the highest-frequency ("zero") octave; higher indices step
/// down one octave each. A field may leave some octaves empty, in which case
/// [`octave_value`](Self::octave_value) returns `None` and the caller skips it.
pub trait NoiseField {
    /// Sample a single octave at already wrapped coordinates.
    ///
    /// Returns `None` when the field has no active octave at `octave`.
    #[allow(clippy::too_many_arguments)]
    fn octave_value(
        &self,
        octave: usize,
        x: f64,
        y: f64,
        z: f64,
        y_scale: f64,
        y_max: f64,
    ) -> Option<f64>;

    /// The zero octave's z lattice offset, or `0.0` if that octave is absent.
    fn zero_octave_offset(&self) -> f64;

    /// Sample the full octave sum.
    ///
    /// With `y_flat_hack` every octave samples at its own `-yo`, ignoring `y`.
    #[allow(clippy::too_many_arguments)]
    fn get_value(
        &self,
        x: f64,
        y: f64,
        z: f64,
        y_scale: f64,
        y_max: f64,
        y_flat_hack: bool,
    ) -> f64;
}
