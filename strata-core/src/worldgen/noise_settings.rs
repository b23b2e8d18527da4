//! Noise settings for density column sampling.
//!
//! Field names follow the JSON layout of noise-settings files, so a settings
//! object can be deserialized directly. Unrelated keys in the same object
//! (surface noise flags and the like) are ignored.

use serde::{Deserialize, Serialize};
use strata_utils::math::clamped_lerp;
use thiserror::Error;

/// Errors produced while loading or validating [`NoiseSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings JSON could not be parsed.
    #[error("Failed to parse noise settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// `size_horizontal` is outside `1..=4`.
    #[error("size_horizontal must be between 1 and 4, got {0}")]
    SizeHorizontal(i32),
    /// `size_vertical` is outside `1..=4`.
    #[error("size_vertical must be between 1 and 4, got {0}")]
    SizeVertical(i32),
    /// The world is shorter than a single coarse cell.
    #[error("height {height} is smaller than one cell of {cell_height} blocks")]
    Height {
        /// Configured world height.
        height: i32,
        /// Height of one coarse cell in blocks.
        cell_height: i32,
    },
    /// A sampling factor is zero and would divide the sampling scale by zero.
    #[error("sampling.{0} must be non-zero")]
    ZeroSamplingFactor(&'static str),
    /// A slide has a negative size.
    #[error("{0} size must not be negative, got {1}")]
    NegativeSlideSize(&'static str, i32),
}

/// Frequency scaling applied to the limit and main noise fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingSettings {
    /// Horizontal scale of the limit fields.
    pub xz_scale: f64,
    /// Vertical scale of the limit fields.
    pub y_scale: f64,
    /// Divisor turning `xz_scale` into the main field's horizontal scale.
    pub xz_factor: f64,
    /// Divisor turning `y_scale` into the main field's vertical scale.
    pub y_factor: f64,
}

/// Blends density toward a fixed target near the top or bottom of the world.
///
/// `size` and `offset` are measured in coarse cells. A size of zero disables
/// the slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideSettings {
    /// Density the slide converges to at the world edge.
    pub target: f64,
    /// Span of the blend in coarse cells.
    pub size: i32,
    /// Distance from the world edge, in coarse cells, where the blend ends.
    pub offset: i32,
}

impl SlideSettings {
    /// A slide that leaves density untouched.
    pub const DISABLED: Self = Self {
        target: 0.0,
        size: 0,
        offset: 0,
    };

    /// Blend `density` toward the target.
    ///
    /// `distance_from_edge` is how many coarse cells the sample lies from the
    /// world edge this slide belongs to. Within `offset` cells of the edge the
    /// result is exactly `target`; from `offset + size` cells on it is exactly
    /// `density`.
    #[must_use]
    pub fn apply(&self, density: f64, distance_from_edge: i32) -> f64 {
        if self.size > 0 {
            let delta = f64::from(distance_from_edge - self.offset) / f64::from(self.size);
            clamped_lerp(self.target, density, delta)
        } else {
            density
        }
    }
}

/// Shape parameters for the density column sampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSettings {
    /// World height in blocks.
    pub height: i32,
    /// Horizontal coarse cell size in units of 4 blocks.
    pub size_horizontal: i32,
    /// Vertical coarse cell size in units of 4 blocks.
    pub size_vertical: i32,
    /// Noise frequency scaling.
    pub sampling: SamplingSettings,
    /// Slide applied near the top of the world.
    pub top_slide: SlideSettings,
    /// Slide applied near the bottom of the world.
    pub bottom_slide: SlideSettings,
    /// Multiplier on the vertical density gradient.
    pub density_factor: f64,
    /// Constant added to the vertical density gradient.
    pub density_offset: f64,
    /// Whether to jitter the gradient per column with the depth noise.
    #[serde(default)]
    pub random_density_offset: bool,
}

impl Default for NoiseSettings {
    /// The classic overworld preset.
    fn default() -> Self {
        Self {
            height: 256,
            size_horizontal: 1,
            size_vertical: 2,
            sampling: SamplingSettings {
                xz_scale: 0.999_999_981_450_774_5,
                y_scale: 0.999_999_981_450_774_5,
                xz_factor: 80.0,
                y_factor: 160.0,
            },
            top_slide: SlideSettings {
                target: -10.0,
                size: 3,
                offset: 0,
            },
            bottom_slide: SlideSettings {
                target: -30.0,
                size: 0,
                offset: 0,
            },
            density_factor: 1.0,
            density_offset: -0.468_75,
            random_density_offset: true,
        }
    }
}

impl NoiseSettings {
    /// Parse settings from a JSON object and validate them.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a usable grid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=4).contains(&self.size_horizontal) {
            return Err(SettingsError::SizeHorizontal(self.size_horizontal));
        }
        if !(1..=4).contains(&self.size_vertical) {
            return Err(SettingsError::SizeVertical(self.size_vertical));
        }
        if self.height < self.cell_height() {
            return Err(SettingsError::Height {
                height: self.height,
                cell_height: self.cell_height(),
            });
        }
        if self.sampling.xz_factor == 0.0 {
            return Err(SettingsError::ZeroSamplingFactor("xz_factor"));
        }
        if self.sampling.y_factor == 0.0 {
            return Err(SettingsError::ZeroSamplingFactor("y_factor"));
        }
        if self.top_slide.size < 0 {
            return Err(SettingsError::NegativeSlideSize(
                "top_slide",
                self.top_slide.size,
            ));
        }
        if self.bottom_slide.size < 0 {
            return Err(SettingsError::NegativeSlideSize(
                "bottom_slide",
                self.bottom_slide.size,
            ));
        }
        Ok(())
    }

    /// Coarse cell width in blocks.
    #[must_use]
    pub const fn cell_width(&self) -> i32 {
        self.size_horizontal * 4
    }

    /// Coarse cell height in blocks.
    #[must_use]
    pub const fn cell_height(&self) -> i32 {
        self.size_vertical * 4
    }

    /// Number of coarse cells stacked over the world height.
    #[must_use]
    pub const fn cell_count_y(&self) -> i32 {
        self.height / self.cell_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let settings = NoiseSettings::default();
        assert_eq!(settings.cell_width(), 4);
        assert_eq!(settings.cell_height(), 8);
        assert_eq!(settings.cell_count_y(), 32);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_settings_json() {
        let json = r#"{
            "height": 128,
            "size_horizontal": 1,
            "size_vertical": 1,
            "sampling": { "xz_scale": 1.0, "y_scale": 1.0, "xz_factor": 80.0, "y_factor": 160.0 },
            "top_slide": { "target": 0.0, "size": 0, "offset": 0 },
            "bottom_slide": { "target": 0.0, "size": 0, "offset": 0 },
            "density_factor": 4.0,
            "density_offset": 20.0,
            "simplex_surface_noise": true
        }"#;

        let settings = NoiseSettings::from_json(json).expect("settings should parse");
        assert_eq!(settings.cell_count_y(), 32);
        assert!(!settings.random_density_offset);
        assert_eq!(settings.top_slide, SlideSettings::DISABLED);
    }

    #[test]
    fn test_validation_rejects_bad_grids() {
        let mut settings = NoiseSettings {
            size_vertical: 0,
            ..NoiseSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::SizeVertical(0))
        ));

        settings.size_vertical = 4;
        settings.height = 8;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Height {
                height: 8,
                cell_height: 16
            })
        ));

        settings.height = 256;
        settings.sampling.y_factor = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::ZeroSamplingFactor("y_factor"))
        ));

        settings.sampling.y_factor = 160.0;
        settings.bottom_slide.size = -1;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NegativeSlideSize("bottom_slide", -1))
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = NoiseSettings::from_json(r#"{ "height": "tall" }"#);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_slide_apply() {
        let slide = SlideSettings {
            target: -10.0,
            size: 4,
            offset: 1,
        };

        #[allow(clippy::float_cmp)]
        {
            // At or inside the offset: fully at target.
            assert_eq!(slide.apply(50.0, 0), -10.0);
            assert_eq!(slide.apply(50.0, 1), -10.0);
            // Past offset + size: untouched.
            assert_eq!(slide.apply(50.0, 5), 50.0);
            assert_eq!(slide.apply(50.0, 9), 50.0);
            // Disabled slides never touch the value.
            assert_eq!(SlideSettings::DISABLED.apply(50.0, 0), 50.0);
        }
        assert!((slide.apply(50.0, 3) - 20.0).abs() < 1e-12);
    }
}
