//! Pixel types, error taxonomy and 8-bit channel arithmetic.

/// Pixel and point types.
pub mod core;
/// Error and result types.
pub mod error;
pub(crate) mod math;
