//! Octave-stacked gradient noise.
//!
//! Combines [`ImprovedNoise`] octaves at successive powers of two so that a
//! single field carries detail from continent scale down to single blocks.

use std::ops::RangeInclusive;

use crate::noise::{ImprovedNoise, NoiseField};
use crate::random::{LegacyRandom, Random};

/// Period used for coordinate wrapping, `2^25`.
const ROUND_OFF: f64 = 33_554_432.0;

/// Random draws taken by one [`ImprovedNoise`], skipped for absent octaves.
const OCTAVE_DRAW_COUNT: u32 = 262;

/// A stack of optional gradient-noise octaves.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    /// Octaves ordered from lowest to highest frequency. `None` where the
    /// amplitude is zero.
    noise_levels: Vec<Option<ImprovedNoise>>,
    amplitudes: Vec<f64>,
    lowest_freq_input_factor: f64,
    lowest_freq_value_factor: f64,
}

impl PerlinNoise {
    /// Create a field with every octave in `octaves` active.
    ///
    /// `-15..=0` yields sixteen octaves whose highest frequency samples the
    /// input coordinates unscaled.
    ///
    /// # Panics
    /// Panics if `octaves` is empty.
    #[must_use]
    pub fn from_octaves<R: Random>(random: &mut R, octaves: RangeInclusive<i32>) -> Self {
        assert!(
            !octaves.is_empty(),
            "octave range {octaves:?} must contain at least one octave"
        );
        let first_octave = *octaves.start();
        let count = (octaves.end() - first_octave + 1) as usize;
        Self::create(random, first_octave, &vec![1.0; count])
    }

    /// Create a field from per-octave amplitudes starting at `first_octave`.
    ///
    /// The zero octave is drawn first, then the lower octaves from high to low
    /// frequency. An octave with zero amplitude still advances `random` by the
    /// draws it would have taken, so toggling one octave never reseeds the
    /// rest. Positive octaves get their own source seeded from the zero octave.
    #[must_use]
    pub fn create<R: Random>(random: &mut R, first_octave: i32, amplitudes: &[f64]) -> Self {
        let octaves = amplitudes.len();
        let zero_octave_index = -first_octave;
        let mut noise_levels: Vec<Option<ImprovedNoise>> = vec![None; octaves];

        let zero_octave = ImprovedNoise::new(random);

        for index in (0..zero_octave_index).rev() {
            let index = index as usize;
            if index < octaves && amplitudes[index] != 0.0 {
                noise_levels[index] = Some(ImprovedNoise::new(random));
            } else {
                random.consume_count(OCTAVE_DRAW_COUNT);
            }
        }

        if zero_octave_index + 1 < octaves as i32 {
            let seed = (zero_octave.noise(0.0, 0.0, 0.0, 0.0, 0.0) * f64::from(9.223_372e18_f32))
                as i64;
            let mut positive_random = LegacyRandom::from_seed(seed as u64);
            for index in (zero_octave_index + 1).max(0)..octaves as i32 {
                let index = index as usize;
                if amplitudes[index] != 0.0 {
                    noise_levels[index] = Some(ImprovedNoise::new(&mut positive_random));
                } else {
                    positive_random.consume_count(OCTAVE_DRAW_COUNT);
                }
            }
        }

        if let Ok(index) = usize::try_from(zero_octave_index)
            && index < octaves
            && amplitudes[index] != 0.0
        {
            noise_levels[index] = Some(zero_octave);
        }

        Self {
            noise_levels,
            amplitudes: amplitudes.to_vec(),
            lowest_freq_input_factor: 2.0_f64.powi(-zero_octave_index),
            lowest_freq_value_factor: 2.0_f64.powi(octaves as i32 - 1)
                / (2.0_f64.powi(octaves as i32) - 1.0),
        }
    }

    /// The octave `i` steps below the highest frequency, if active.
    #[must_use]
    pub fn octave(&self, i: usize) -> Option<&ImprovedNoise> {
        let index = self.noise_levels.len().checked_sub(i + 1)?;
        self.noise_levels[index].as_ref()
    }

    /// Number of octave slots, active or not.
    #[must_use]
    pub const fn octave_count(&self) -> usize {
        self.noise_levels.len()
    }
}

impl NoiseField for PerlinNoise {
    #[inline]
    fn octave_value(
        &self,
        octave: usize,
        x: f64,
        y: f64,
        z: f64,
        y_scale: f64,
        y_max: f64,
    ) -> Option<f64> {
        self.octave(octave)
            .map(|noise| noise.noise(x, y, z, y_scale, y_max))
    }

    fn zero_octave_offset(&self) -> f64 {
        self.octave(0).map_or(0.0, |noise| noise.zo)
    }

    fn get_value(
        &self,
        x: f64,
        y: f64,
        z: f64,
        y_scale: f64,
        y_max: f64,
        y_flat_hack: bool,
    ) -> f64 {
        let mut value = 0.0;
        let mut input_factor = self.lowest_freq_input_factor;
        let mut value_factor = self.lowest_freq_value_factor;

        for (noise, amplitude) in self.noise_levels.iter().zip(&self.amplitudes) {
            if let Some(noise) = noise {
                let sample = noise.noise(
                    wrap(x * input_factor),
                    if y_flat_hack {
                        -noise.yo
                    } else {
                        wrap(y * input_factor)
                    },
                    wrap(z * input_factor),
                    y_scale * input_factor,
                    y_max * input_factor,
                );
                value += amplitude * sample * value_factor;
            }

            input_factor *= 2.0;
            value_factor /= 2.0;
        }

        value
    }
}

/// Fold a coordinate into `[-2^24, 2^24]` so far-away samples keep their
/// fractional precision.
#[inline]
#[must_use]
pub fn wrap(x: f64) -> f64 {
    x - (x / ROUND_OFF + 0.5).floor() * ROUND_OFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_value() {
        let mut rng = LegacyRandom::from_seed(42);
        let noise = PerlinNoise::from_octaves(&mut rng, -7..=0);

        let v = noise.get_value(100.0, 64.0, 100.0, 0.0, 0.0, false);
        assert!((v - 0.026_182_526_412_834_542).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn test_octave_indexing() {
        let mut rng = LegacyRandom::from_seed(3);
        let noise = PerlinNoise::from_octaves(&mut rng, -7..=0);

        assert_eq!(noise.octave_count(), 8);
        assert!(noise.octave(0).is_some());
        assert!(noise.octave(7).is_some());
        assert!(noise.octave(8).is_none());
    }

    #[test]
    fn test_zero_octave_is_drawn_first() {
        let mut rng = LegacyRandom::from_seed(77);
        let noise = PerlinNoise::from_octaves(&mut rng, -15..=0);

        let mut rng = LegacyRandom::from_seed(77);
        let first = ImprovedNoise::new(&mut rng);

        #[allow(clippy::float_cmp)]
        {
            assert_eq!(noise.zero_octave_offset(), first.zo);
        }
    }

    #[test]
    fn test_silent_octave_keeps_other_seeds() {
        let mut rng = LegacyRandom::from_seed(11);
        let full = PerlinNoise::create(&mut rng, -3, &[1.0, 1.0, 1.0, 1.0]);

        let mut rng = LegacyRandom::from_seed(11);
        let sparse = PerlinNoise::create(&mut rng, -3, &[1.0, 0.0, 1.0, 1.0]);

        assert!(sparse.octave(2).is_none());
        for i in [0, 1, 3] {
            let a = full.octave_value(i, 1.5, 2.5, 3.5, 0.0, 0.0);
            let b = sparse.octave_value(i, 1.5, 2.5, 3.5, 0.0, 0.0);
            assert_eq!(a, b, "octave {i} changed when octave 2 was silenced");
        }
    }

    #[test]
    fn test_positive_octaves_are_populated() {
        let mut rng = LegacyRandom::from_seed(8);
        let noise = PerlinNoise::from_octaves(&mut rng, -2..=2);

        assert_eq!(noise.octave_count(), 5);
        for i in 0..5 {
            assert!(noise.octave(i).is_some(), "octave {i} missing");
        }
    }

    #[test]
    fn test_wrap() {
        assert!((wrap(100.0) - 100.0).abs() < 1e-10);
        assert!((wrap(-100.0) + 100.0).abs() < 1e-10);

        let wrapped = wrap(100_000_000.0);
        assert!(wrapped.abs() <= ROUND_OFF / 2.0);
        assert!((wrapped - (100_000_000.0 - 3.0 * ROUND_OFF)).abs() < 1e-6);
    }
}
