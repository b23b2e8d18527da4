//! Vertical cross-sections built from consecutive dense columns.

use strata_utils::noise::NoiseField;
use tracing::debug;

use super::{DensityColumnSampler, NoiseSettings};

/// Dense densities for a run of block x positions.
///
/// Stored column-major: all heights of the first column, then the next.
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySlice {
    x_start: i32,
    height: usize,
    values: Vec<f64>,
}

impl DensitySlice {
    /// First block x covered by the slice.
    #[must_use]
    pub const fn x_start(&self) -> i32 {
        self.x_start
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        if self.height == 0 {
            0
        } else {
            self.values.len() / self.height
        }
    }

    /// Number of block heights per column.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The dense column at offset `column` from [`x_start`](Self::x_start).
    ///
    /// # Panics
    /// Panics if `column` is out of range.
    #[must_use]
    pub fn column(&self, column: usize) -> &[f64] {
        let start = column * self.height;
        &self.values[start..start + self.height]
    }

    /// Density at column offset `column` and block height `y`.
    #[must_use]
    pub fn density(&self, column: usize, y: usize) -> f64 {
        self.column(column)[y]
    }

    /// Whether the block is solid, i.e. its density exceeds `threshold`.
    #[must_use]
    pub fn is_solid(&self, column: usize, y: usize, threshold: f64) -> bool {
        self.density(column, y) > threshold
    }
}

impl<N: NoiseField> DensityColumnSampler<N> {
    /// Sample `width` dense columns starting at block `x_start`.
    ///
    /// Resets the sampler with the smallest window that covers every coarse
    /// column the slice touches, including the trailing edge column.
    ///
    /// # Panics
    /// Panics if `x_start + width` does not fit in an `i32`.
    pub fn sample_slice(
        &mut self,
        settings: &NoiseSettings,
        biome_depth: f64,
        biome_scale: f64,
        x_start: i32,
        width: u32,
    ) -> DensitySlice {
        let cell_width = settings.cell_width();
        let x_end = i32::try_from(width)
            .ok()
            .and_then(|width| x_start.checked_add(width))
            .unwrap_or_else(|| panic!("slice of {width} columns from x {x_start} overflows i32"));
        let first_cell = x_start.div_euclid(cell_width);
        let last_cell = (x_end - 1).div_euclid(cell_width) + 1;
        let window_width = (last_cell - first_cell + 1) as usize;

        self.reset(
            settings,
            biome_depth,
            biome_scale,
            first_cell,
            window_width,
        );

        let height = (self.cell_count_y() * self.cell_height()) as usize;
        let mut values = Vec::with_capacity(height * width as usize);
        for x in x_start..x_end {
            values.extend(self.iterate_noise_column(x));
        }

        debug!(
            x_start,
            width,
            coarse_columns = self.cached_columns(),
            "Sampled density slice"
        );

        DensitySlice {
            x_start,
            height,
            values,
        }
    }
}
