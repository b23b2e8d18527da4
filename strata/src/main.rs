//! Prints a vertical cross-section of preview terrain.
//!
//! Usage: `strata [config.json5]`. Without an argument `preview.json5` in the
//! working directory is used; a missing file falls back to the defaults.

mod config;

use std::env;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use strata_core::worldgen::{DensityColumnSampler, DensitySlice};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::PreviewConfig;

const DEFAULT_CONFIG: &str = "preview.json5";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let path = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = PreviewConfig::load(&path)?;

    let start = Instant::now();
    let mut sampler = DensityColumnSampler::from_world_seed(config.seed);
    let slice = sampler.sample_slice(
        &config.noise,
        config.biome_depth,
        config.biome_scale,
        config.x_start,
        config.width,
    );
    info!(
        seed = config.seed,
        width = slice.width(),
        height = slice.height(),
        "Sampled cross-section in {:?}",
        start.elapsed()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    render(&slice, config.threshold, &mut out).context("Failed to write cross-section")?;
    out.flush().context("Failed to flush cross-section")?;
    Ok(())
}

/// Draw the slice top-down, `#` for solid and `.` for air.
fn render<W: Write>(slice: &DensitySlice, threshold: f64, out: &mut W) -> io::Result<()> {
    let mut line = String::with_capacity(slice.width());
    for y in (0..slice.height()).rev() {
        line.clear();
        line.extend((0..slice.width()).map(|x| {
            if slice.is_solid(x, y, threshold) {
                '#'
            } else {
                '.'
            }
        }));
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use strata_core::worldgen::NoiseSettings;

    use super::*;

    #[test]
    fn test_render_dimensions() {
        let settings = NoiseSettings {
            height: 32,
            ..NoiseSettings::default()
        };
        let mut sampler = DensityColumnSampler::from_world_seed(1);
        let slice = sampler.sample_slice(&settings, 0.1, 0.2, 0, 12);

        let mut out = Vec::new();
        render(&slice, 0.0, &mut out).expect("render to memory");
        let text = String::from_utf8(out).expect("ascii output");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert!(lines.iter().all(|line| line.len() == 12));
        assert!(text.chars().all(|c| matches!(c, '#' | '.' | '\n')));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = PreviewConfig::load(Path::new("does/not/exist.json5")).expect("defaults");
        assert_eq!(config.width, 96);
        assert_eq!(config.noise, NoiseSettings::default());
    }
}
