//! Density column sampler.
//!
//! Terrain density is evaluated on a coarse grid (one sample per coarse cell
//! corner) and bilinearly reconstructed into per-block columns. Each coarse
//! sample blends two broad "limit" noise fields using a third "main" field as
//! the weight, then adds a vertical gradient and optional edge slides.
//!
//! A sampler covers one preview region at a time: [`DensityColumnSampler::reset`]
//! sets the geometry and the window of coarse columns that may be cached, and
//! [`DensityColumnSampler::iterate_noise_column`] produces dense columns within
//! it. Samplers are not shared; sample regions in parallel with one sampler each.

use std::sync::Arc;

use strata_utils::math::{clamped_lerp, lerp2};
use strata_utils::noise::{NoiseField, PerlinNoise, wrap};
use strata_utils::random::{LegacyRandom, Random};
use tracing::{debug, trace};

use super::{ColumnCache, NoiseSettings};

/// Base coordinate scale shared by the limit and main fields.
const COORDINATE_SCALE: f64 = 684.412;
/// Octaves summed by the limit fields.
const LIMIT_OCTAVES: usize = 16;
/// Octaves summed by the main field.
const MAIN_OCTAVES: usize = 8;

/// Seeds for the four noise fields a sampler owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseSeeds {
    /// Seed of the lower limit field.
    pub min_limit: u64,
    /// Seed of the upper limit field.
    pub max_limit: u64,
    /// Seed of the blend-weight field.
    pub main: u64,
    /// Seed of the depth field behind the random density offset.
    pub depth: u64,
}

impl NoiseSeeds {
    /// Derive all four seeds from one world seed.
    #[must_use]
    pub fn from_world_seed(seed: u64) -> Self {
        let mut rng = LegacyRandom::from_seed(seed);
        Self {
            min_limit: rng.next_i64() as u64,
            max_limit: rng.next_i64() as u64,
            main: rng.next_i64() as u64,
            depth: rng.next_i64() as u64,
        }
    }
}

/// Sampling-space scales derived from [`SamplingSettings`](super::SamplingSettings).
#[derive(Debug, Clone, Copy)]
struct SamplingScales {
    xz_scale: f64,
    y_scale: f64,
    xz_factor: f64,
    y_factor: f64,
}

impl SamplingScales {
    fn new(settings: &NoiseSettings) -> Self {
        let xz_scale = COORDINATE_SCALE * settings.sampling.xz_scale;
        let y_scale = COORDINATE_SCALE * settings.sampling.y_scale;
        Self {
            xz_scale,
            y_scale,
            xz_factor: xz_scale / settings.sampling.xz_factor,
            y_factor: y_scale / settings.sampling.y_factor,
        }
    }
}

/// Grid geometry and biome inputs for the current region.
#[derive(Debug, Clone, Copy)]
struct ColumnGrid {
    settings: NoiseSettings,
    cell_width: i32,
    cell_height: i32,
    cell_count_y: i32,
    biome_depth: f64,
    biome_scale: f64,
}

impl ColumnGrid {
    const fn new(settings: NoiseSettings, biome_depth: f64, biome_scale: f64) -> Self {
        Self {
            settings,
            cell_width: settings.cell_width(),
            cell_height: settings.cell_height(),
            cell_count_y: settings.cell_count_y(),
            biome_depth,
            biome_scale,
        }
    }
}

impl Default for ColumnGrid {
    fn default() -> Self {
        Self::new(NoiseSettings::default(), 0.1, 0.2)
    }
}

/// The four noise fields plus the zero-octave offsets fed back as z inputs.
#[derive(Debug, Clone)]
struct TerrainNoises<N> {
    min_limit: N,
    max_limit: N,
    main: N,
    depth: N,
    /// The main field's zero-octave z offset. Used as the z coordinate of every
    /// limit and main sample to decorrelate the preview plane from the lattice.
    main_z: f64,
    /// The depth field's zero-octave z offset.
    depth_z: f64,
}

impl<N: NoiseField> TerrainNoises<N> {
    fn new(min_limit: N, max_limit: N, main: N, depth: N) -> Self {
        let main_z = main.zero_octave_offset();
        let depth_z = depth.zero_octave_offset();
        Self {
            min_limit,
            max_limit,
            main,
            depth,
            main_z,
            depth_z,
        }
    }

    /// Build the coarse column at coarse `x`: `cell_count_y + 1` densities,
    /// bottom first.
    fn column(&self, grid: &ColumnGrid, x: i32) -> Arc<[f64]> {
        let settings = &grid.settings;
        let scaled_depth = 0.265_625 * grid.biome_depth;
        let scaled_scale = 96.0 / grid.biome_scale;
        let scales = SamplingScales::new(settings);
        let random_density = if settings.random_density_offset {
            self.random_density(x)
        } else {
            0.0
        };

        (0..=grid.cell_count_y)
            .map(|y| {
                let mut noise = self.sample_and_clamp_noise(x, y, self.main_z, &scales);

                let y_offset =
                    1.0 - f64::from(y) * 2.0 / f64::from(grid.cell_count_y) + random_density;
                let density = y_offset * settings.density_factor + settings.density_offset;
                let falloff = (density + scaled_depth) * scaled_scale;
                // Solid side of the gradient is four times steeper than the air side.
                noise += falloff * if falloff > 0.0 { 4.0 } else { 1.0 };

                noise = settings.top_slide.apply(noise, grid.cell_count_y - y);
                settings.bottom_slide.apply(noise, y)
            })
            .collect()
    }

    /// Per-column jitter of the vertical gradient, drawn from the depth field.
    fn random_density(&self, x: i32) -> f64 {
        let noise = self
            .depth
            .get_value(f64::from(x) * 200.0, 10.0, self.depth_z, 1.0, 0.0, true);
        let a = if noise < 0.0 { -noise * 0.3 } else { noise };
        let b = a * 24.575_625 - 2.0;
        if b < 0.0 {
            b * 0.009_486_607_142_857_142
        } else {
            b.min(1.0) * 0.006_640_625
        }
    }

    /// Blend the two limit fields using the main field as the weight.
    #[allow(clippy::many_single_char_names)]
    fn sample_and_clamp_noise(&self, x: i32, y: i32, z: f64, scales: &SamplingScales) -> f64 {
        let x = f64::from(x);
        let y = f64::from(y);

        let mut min_limit = 0.0;
        let mut max_limit = 0.0;
        let mut main = 0.0;
        let mut d = 1.0;

        for octave in 0..LIMIT_OCTAVES {
            let x2 = wrap(x * scales.xz_scale * d);
            let y2 = wrap(y * scales.y_scale * d);
            let z2 = wrap(z * scales.xz_scale * d);
            let e = scales.y_scale * d;

            if let Some(noise) = self.min_limit.octave_value(octave, x2, y2, z2, e, y * e) {
                min_limit += noise / d;
            }

            if let Some(noise) = self.max_limit.octave_value(octave, x2, y2, z2, e, y * e) {
                max_limit += noise / d;
            }

            if octave < MAIN_OCTAVES
                && let Some(noise) = self.main.octave_value(
                    octave,
                    wrap(x * scales.xz_factor * d),
                    wrap(y * scales.y_factor * d),
                    wrap(z * scales.xz_factor * d),
                    scales.y_factor * d,
                    y * scales.y_factor * d,
                )
            {
                main += noise / d;
            }

            d /= 2.0;
        }

        clamped_lerp(
            min_limit / 512.0,
            max_limit / 512.0,
            (main / 10.0 + 1.0) / 2.0,
        )
    }
}

/// Samples terrain density columns for one preview region at a time.
///
/// Generic over the [`NoiseField`] so tests can substitute instrumented or
/// constant fields; production code uses [`PerlinNoise`].
#[derive(Debug)]
pub struct DensityColumnSampler<N = PerlinNoise> {
    noises: TerrainNoises<N>,
    grid: ColumnGrid,
    cache: ColumnCache,
}

impl DensityColumnSampler<PerlinNoise> {
    /// Create a sampler with each field built from its own seed.
    ///
    /// The limit and depth fields span octaves `-15..=0`, the main field
    /// `-7..=0`.
    #[must_use]
    pub fn new(seeds: NoiseSeeds) -> Self {
        let field = |seed: u64, first_octave: i32| {
            PerlinNoise::from_octaves(&mut LegacyRandom::from_seed(seed), first_octave..=0)
        };
        Self::with_noises(
            field(seeds.min_limit, -15),
            field(seeds.max_limit, -15),
            field(seeds.main, -7),
            field(seeds.depth, -15),
        )
    }

    /// Create a sampler with all field seeds derived from `seed`.
    #[must_use]
    pub fn from_world_seed(seed: u64) -> Self {
        Self::new(NoiseSeeds::from_world_seed(seed))
    }
}

impl<N: NoiseField> DensityColumnSampler<N> {
    /// Create a sampler from prebuilt fields.
    ///
    /// The sampler starts with the default settings and an empty window; call
    /// [`reset`](Self::reset) before sampling.
    #[must_use]
    pub fn with_noises(min_limit: N, max_limit: N, main: N, depth: N) -> Self {
        Self {
            noises: TerrainNoises::new(min_limit, max_limit, main, depth),
            grid: ColumnGrid::default(),
            cache: ColumnCache::default(),
        }
    }

    /// Start a new region.
    ///
    /// Replaces the settings and biome inputs and discards every cached
    /// column. Afterwards coarse columns `window_offset..window_offset +
    /// window_width` may be sampled; note that a dense column at block x needs
    /// the coarse columns at `x / cell_width` and the one after it.
    ///
    /// # Panics
    /// Panics if `settings.size_vertical` is not positive.
    pub fn reset(
        &mut self,
        settings: &NoiseSettings,
        biome_depth: f64,
        biome_scale: f64,
        window_offset: i32,
        window_width: usize,
    ) {
        assert!(
            settings.cell_height() > 0,
            "size_vertical must be positive, got {}",
            settings.size_vertical
        );

        self.grid = ColumnGrid::new(*settings, biome_depth, biome_scale);
        self.cache = ColumnCache::new(window_offset, window_width);

        debug!(
            cell_width = self.grid.cell_width,
            cell_height = self.grid.cell_height,
            cell_count_y = self.grid.cell_count_y,
            window_offset,
            window_width,
            "Reset density column sampler"
        );
    }

    /// The coarse column at coarse `x`, computed on first request and cached
    /// until the next [`reset`](Self::reset).
    ///
    /// Holds `cell_count_y + 1` densities, bottom first.
    ///
    /// # Panics
    /// Panics if `x` lies outside the current window.
    pub fn fill_noise_column(&mut self, x: i32) -> Arc<[f64]> {
        let Self {
            noises,
            grid,
            cache,
        } = self;

        cache.get_or_insert_with(x, || {
            let column = noises.column(grid, x);
            trace!(x, samples = column.len(), "Filled coarse column");
            column
        })
    }

    /// The coarse column at coarse `x` if it is already cached.
    ///
    /// # Panics
    /// Panics if `x` lies outside the current window.
    #[must_use]
    pub fn cached_column(&self, x: i32) -> Option<&[f64]> {
        self.cache.get(x).map(|column| &**column)
    }

    /// Number of coarse columns cached in the current window.
    #[must_use]
    pub fn cached_columns(&self) -> usize {
        self.cache.filled()
    }

    /// The dense column at block `x`: one density per block height, bottom
    /// first, `cell_count_y * cell_height` values.
    ///
    /// # Panics
    /// Panics if the coarse columns around `x` lie outside the current window.
    pub fn iterate_noise_column(&mut self, x: i32) -> Vec<f64> {
        let cell_width = self.grid.cell_width;
        let cell_height = self.grid.cell_height;
        let cell_count_y = self.grid.cell_count_y;

        let cx = x.div_euclid(cell_width);
        // Truncating remainder: left of zero the fraction is negative and the
        // column extrapolates backward from `cx`.
        let ox = f64::from(x % cell_width) / f64::from(cell_width);
        let noise1 = self.fill_noise_column(cx);
        let noise2 = self.fill_noise_column(cx + 1);

        let len = (cell_count_y * cell_height) as usize;
        // Rows on coarse boundaries are written twice, once from each side,
        // the topmost one past the end of the column.
        let mut data = vec![0.0; len + 1];
        for y in (0..cell_count_y).rev() {
            let lower = y as usize;
            let upper = lower + 1;
            for yy in (0..=cell_height).rev() {
                let oy = f64::from(yy) / f64::from(cell_height);
                let index = (y * cell_height + yy) as usize;
                data[index] = lerp2(
                    oy,
                    ox,
                    noise1[lower],
                    noise1[upper],
                    noise2[lower],
                    noise2[upper],
                );
            }
        }
        data.truncate(len);
        data
    }

    /// Coarse cell width in blocks for the current region.
    #[must_use]
    pub const fn cell_width(&self) -> i32 {
        self.grid.cell_width
    }

    /// Coarse cell height in blocks for the current region.
    #[must_use]
    pub const fn cell_height(&self) -> i32 {
        self.grid.cell_height
    }

    /// Number of coarse cells stacked over the world height.
    #[must_use]
    pub const fn cell_count_y(&self) -> i32 {
        self.grid.cell_count_y
    }
}
