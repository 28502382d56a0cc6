//! Quadblit is a CPU image-compositing engine for straight-alpha BGRA rasters.
//!
//! A draw resamples a source raster through an affine placement or a four-corner perspective
//! mapping, mixes alpha with a Porter-Duff operator and color with a blend mode, and writes the
//! result into the destination in place:
//!
//! - Configure an [`Engine`] (composite, blend, resample modes)
//! - Install or clear a destination [`Image`]
//! - Call [`Engine::draw`] / [`Engine::draw_perspective`] with a source [`ImageView`]
//!
//! [`Script`] replays a JSON list of engine operations; the `quadblit` binary drives it from PNG
//! files.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Blend and composite operator libraries.
pub mod effects;
/// Pixel types, errors, channel math.
pub mod foundation;
/// Raster storage and sampling.
pub mod raster;
/// Per-pixel compositing and scan loops.
pub mod render;
/// JSON draw scripts.
pub mod script;
/// Engine mode state.
pub mod session;
/// 2D transforms and the homography solver.
pub mod transform;

pub use crate::effects::blend::{BlendFn, BlendMode};
pub use crate::effects::composite::CompositeOp;
pub use crate::foundation::core::{Bgra8, Point, Rect, YCbCr};
pub use crate::foundation::error::{QuadblitError, QuadblitResult};
pub use crate::raster::image::{Image, ImageView};
pub use crate::raster::resample::Resample;
pub use crate::render::draw::{DrawParams, DrawStats, PerspectiveParams, ScanRegion};
pub use crate::render::pipeline::PixelCompositor;
pub use crate::script::{BlendSelector, Command, Script};
pub use crate::session::engine::{Engine, EngineOpts};
pub use crate::transform::homography::solve_homography;
pub use crate::transform::mat::Mat;
pub use crate::transform::quad::Quad;
