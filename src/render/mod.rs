//! CPU compositing: per-pixel fusion and the draw scan loops.

/// Affine and perspective scan loops.
pub mod draw;
/// Per-pixel compositor.
pub mod pipeline;
