//! World generation module.
//!
//! This module provides the density column sampler and the settings that
//! shape it. Positive density is solid, negative is air; where exactly the
//! surface sits is decided by the caller's threshold.

mod column_cache;
mod density_column;
mod noise_settings;
mod slice;

pub(crate) use column_cache::ColumnCache;
pub use density_column::{DensityColumnSampler, NoiseSeeds};
pub use noise_settings::{NoiseSettings, SamplingSettings, SettingsError, SlideSettings};
pub use slice::DensitySlice;
