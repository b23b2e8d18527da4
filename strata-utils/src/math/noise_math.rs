//! Interpolation helpers shared by the noise generators and the density sampler.
//!
//! Operation order matters here: the density sampler is expected to reproduce
//! reference columns bit-for-bit, so none of these may be rewritten into an
//! algebraically equivalent but differently rounded form.

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3` used for octave interpolation weights.
#[inline]
#[must_use]
pub fn smoothstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Floors `v` to an `i32` by truncating and correcting negative fractions.
#[inline]
#[must_use]
pub fn floor(v: f64) -> i32 {
    let i = v as i32;
    if v < f64::from(i) { i - 1 } else { i }
}

/// Linear interpolation from `start` to `end` by `delta`.
///
/// Computed as `start + delta * (end - start)`.
#[inline]
#[must_use]
pub fn lerp(delta: f64, start: f64, end: f64) -> f64 {
    start + delta * (end - start)
}

/// Bilinear interpolation of four corner values.
///
/// `delta1` runs along the first axis (`x00 -> x10`, `x01 -> x11`), then the
/// two results are blended along the second axis with `delta2`.
#[inline]
#[must_use]
pub fn lerp2(delta1: f64, delta2: f64, x00: f64, x10: f64, x01: f64, x11: f64) -> f64 {
    lerp(delta2, lerp(delta1, x00, x10), lerp(delta1, x01, x11))
}

/// Trilinear interpolation of eight corner values.
#[inline]
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn lerp3(
    delta1: f64,
    delta2: f64,
    delta3: f64,
    x000: f64,
    x100: f64,
    x010: f64,
    x110: f64,
    x001: f64,
    x101: f64,
    x011: f64,
    x111: f64,
) -> f64 {
    lerp(
        delta3,
        lerp2(delta1, delta2, x000, x100, x010, x110),
        lerp2(delta1, delta2, x001, x101, x011, x111),
    )
}

/// Linear interpolation with `delta` clamped to `[0, 1]`.
///
/// Outside the unit interval the matching endpoint is returned as-is, so the
/// result is exactly `start` or `end` rather than a rounded interpolation.
#[inline]
#[must_use]
pub fn clamped_lerp(start: f64, end: f64, delta: f64) -> f64 {
    if delta < 0.0 {
        start
    } else if delta > 1.0 {
        end
    } else {
        lerp(delta, start, end)
    }
}
