//! Closed operator libraries: color blends and Porter-Duff factors.

/// Blend modes.
pub mod blend;
/// Porter-Duff composite operators.
pub mod composite;
