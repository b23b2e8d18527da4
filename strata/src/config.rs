//! Preview configuration, read from a JSON5 file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use strata_core::worldgen::NoiseSettings;
use tracing::info;

/// What to sample and how to shape it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// World seed for the four noise fields.
    pub seed: u64,
    /// Biome depth bias.
    pub biome_depth: f64,
    /// Biome scale; smaller values exaggerate vertical relief.
    pub biome_scale: f64,
    /// First block x of the cross-section.
    pub x_start: i32,
    /// Number of block columns to sample.
    pub width: u32,
    /// Densities above this are drawn as solid.
    pub threshold: f64,
    /// Noise settings shaping the terrain.
    pub noise: NoiseSettings,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            biome_depth: 0.1,
            biome_scale: 0.2,
            x_start: 0,
            width: 96,
            threshold: 0.0,
            noise: NoiseSettings::default(),
        }
    }
}

impl PreviewConfig {
    /// Load the config at `path`, or the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json5::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .noise
            .validate()
            .with_context(|| format!("Invalid noise settings in {}", path.display()))?;
        anyhow::ensure!(config.width > 0, "width must be at least 1");
        anyhow::ensure!(
            config.biome_scale != 0.0,
            "biome_scale must be non-zero"
        );

        Ok(config)
    }
}
