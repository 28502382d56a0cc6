//! Raster storage and sampling.

/// Owned and borrowed rasters.
pub mod image;
/// Nearest and bilinear sampling.
pub mod resample;
