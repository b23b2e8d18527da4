//! Terrain density sampling for world previews.
//!
//! The [`worldgen`] module turns noise settings and a seed into vertical
//! density columns without building any chunks.

pub mod worldgen;
