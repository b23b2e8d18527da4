//! Single-octave gradient noise.

use crate::math::{floor, lerp3, smoothstep};
use crate::noise::GRADIENT;
use crate::random::Random;

/// Vertical snap epsilon. Kept at single precision, widened to `f64`.
const SHIFT_UP_EPSILON: f64 = 1.0e-7_f32 as f64;

/// One octave of 3D gradient noise.
///
/// Each instance has its own shuffled permutation table and a random lattice
/// offset, so two instances drawn from the same random source are uncorrelated.
#[derive(Debug, Clone)]
pub struct ImprovedNoise {
    p: [u8; 256],
    /// X lattice offset.
    pub xo: f64,
    /// Y lattice offset.
    pub yo: f64,
    /// Z lattice offset.
    pub zo: f64,
}

impl ImprovedNoise {
    /// Draw offsets and a permutation table from `random`.
    ///
    /// Consumes three doubles, then 256 bounded ints for the shuffle.
    pub fn new<R: Random>(random: &mut R) -> Self {
        let xo = random.next_f64() * 256.0;
        let yo = random.next_f64() * 256.0;
        let zo = random.next_f64() * 256.0;

        let mut p = [0u8; 256];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = i as u8;
        }

        for i in 0..256 {
            let offset = random.next_i32_bounded((256 - i) as i32) as usize;
            p.swap(i, i + offset);
        }

        Self { p, xo, yo, zo }
    }

    /// Sample the octave.
    ///
    /// When `y_scale` is non-zero the vertical lattice coordinate is snapped
    /// down to a multiple of `y_scale`; `y_max` caps the snap when it lies in
    /// `[0, yr)`. This keeps vertically stretched noise from repeating within a
    /// single lattice cell.
    #[must_use]
    #[allow(clippy::many_single_char_names, clippy::similar_names)]
    pub fn noise(&self, x: f64, y: f64, z: f64, y_scale: f64, y_max: f64) -> f64 {
        let x = x + self.xo;
        let y = y + self.yo;
        let z = z + self.zo;

        let xf = floor(x);
        let yf = floor(y);
        let zf = floor(z);

        let xr = x - f64::from(xf);
        let yr = y - f64::from(yf);
        let zr = z - f64::from(zf);

        #[allow(clippy::if_not_else)]
        let y_snap = if y_scale != 0.0 {
            let limit = if y_max >= 0.0 && y_max < yr { y_max } else { yr };
            f64::from(floor(limit / y_scale + SHIFT_UP_EPSILON)) * y_scale
        } else {
            0.0
        };

        self.sample_and_lerp(xf, yf, zf, xr, yr - y_snap, zr, yr)
    }

    #[inline]
    const fn p(&self, i: i32) -> i32 {
        self.p[(i & 255) as usize] as i32
    }

    /// Hash the eight lattice corners and blend their gradient contributions.
    ///
    /// `yr` is the snapped fractional y used in the dot products while
    /// `yr_fade` is the unsnapped one used for the fade weight.
    #[allow(clippy::too_many_arguments)]
    fn sample_and_lerp(
        &self,
        x: i32,
        y: i32,
        z: i32,
        xr: f64,
        yr: f64,
        zr: f64,
        yr_fade: f64,
    ) -> f64 {
        let x0 = self.p(x);
        let x1 = self.p(x + 1);
        let xy00 = self.p(x0 + y);
        let xy01 = self.p(x0 + y + 1);
        let xy10 = self.p(x1 + y);
        let xy11 = self.p(x1 + y + 1);

        let d000 = grad_dot(self.p(xy00 + z), xr, yr, zr);
        let d100 = grad_dot(self.p(xy10 + z), xr - 1.0, yr, zr);
        let d010 = grad_dot(self.p(xy01 + z), xr, yr - 1.0, zr);
        let d110 = grad_dot(self.p(xy11 + z), xr - 1.0, yr - 1.0, zr);
        let d001 = grad_dot(self.p(xy00 + z + 1), xr, yr, zr - 1.0);
        let d101 = grad_dot(self.p(xy10 + z + 1), xr - 1.0, yr, zr - 1.0);
        let d011 = grad_dot(self.p(xy01 + z + 1), xr, yr - 1.0, zr - 1.0);
        let d111 = grad_dot(self.p(xy11 + z + 1), xr - 1.0, yr - 1.0, zr - 1.0);

        lerp3(
            smoothstep(xr),
            smoothstep(yr_fade),
            smoothstep(zr),
            d000,
            d100,
            d010,
            d110,
            d001,
            d101,
            d011,
            d111,
        )
    }
}

#[inline]
fn grad_dot(hash: i32, x: f64, y: f64, z: f64) -> f64 {
    let g = &GRADIENT[(hash & 15) as usize];
    f64::from(g[0]) * x + f64::from(g[1]) * y + f64::from(g[2]) * z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::LegacyRandom;

    #[test]
    fn test_offsets_and_reference_sample() {
        let mut rng = LegacyRandom::from_seed(12345);
        let noise = ImprovedNoise::new(&mut rng);

        assert!((noise.xo - 92.621_595_433_080_78).abs() < 1e-12);
        assert!((noise.yo - 238.846_332_233_866_5).abs() < 1e-12);
        assert!((noise.zo - 213.271_385_336_582_06).abs() < 1e-12);

        let v = noise.noise(0.5, 0.25, 0.75, 0.0, 0.0);
        assert!((v - -0.231_339_688_589_861_5).abs() < 1e-12);
    }

    #[test]
    fn test_permutation_is_a_permutation() {
        let mut rng = LegacyRandom::from_seed(99);
        let noise = ImprovedNoise::new(&mut rng);

        let mut seen = [false; 256];
        for &v in &noise.p {
            assert!(!seen[v as usize], "duplicate entry {v}");
            seen[v as usize] = true;
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let mut rng = LegacyRandom::from_seed(5);
        let noise = ImprovedNoise::new(&mut rng);

        // Gradient noise vanishes wherever all three shifted coordinates are integral.
        let v = noise.noise(
            10.0 - noise.xo.fract(),
            3.0 - noise.yo.fract(),
            -7.0 - noise.zo.fract(),
            0.0,
            0.0,
        );
        assert!(v.abs() < 1e-9, "expected ~0 at lattice point, got {v}");
    }

    #[test]
    fn test_range() {
        let mut rng = LegacyRandom::from_seed(42);
        let noise = ImprovedNoise::new(&mut rng);

        for x in -10..10 {
            for z in -10..10 {
                let v = noise.noise(f64::from(x) * 1.7, 64.3, f64::from(z) * 2.3, 0.0, 0.0);
                assert!((-1.5..=1.5).contains(&v), "value {v} at ({x}, {z})");
            }
        }
    }
}
