//! Engine mode state: active operators plus the owned destination raster.
//!
//! Mode setters follow "last write wins" and persist across draw calls. Unknown composite and
//! resample ids are ignored (the previous mode stays); unknown blend selectors fall back to
//! [`BlendMode::Normal`].

use crate::effects::blend::BlendMode;
use crate::effects::composite::CompositeOp;
use crate::foundation::core::Bgra8;
use crate::foundation::error::QuadblitResult;
use crate::raster::image::{Image, ImageView};
use crate::raster::resample::Resample;
use crate::render::draw::{DrawParams, DrawStats, PerspectiveParams, draw_affine, draw_perspective};

/// Initial operator selection of an [`Engine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Color merge function.
    pub blend: BlendMode,
    /// Porter-Duff operator.
    pub composite: CompositeOp,
    /// Source sampling strategy.
    pub resample: Resample,
}

impl EngineOpts {
    /// Set the blend mode.
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Set the composite operator.
    pub fn with_composite(mut self, composite: CompositeOp) -> Self {
        self.composite = composite;
        self
    }

    /// Set the resample strategy.
    pub fn with_resample(mut self, resample: Resample) -> Self {
        self.resample = resample;
        self
    }
}

/// Compositing engine owning one destination raster.
///
/// Starts as (source-over, normal, bilinear) over an empty `0x0` destination.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    opts: EngineOpts,
    dest: Image,
}

impl Engine {
    /// Engine with default modes and an empty destination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the given initial modes and an empty destination.
    pub fn with_opts(opts: EngineOpts) -> Self {
        Self {
            opts,
            dest: Image::default(),
        }
    }

    /// Currently active modes.
    pub fn opts(&self) -> EngineOpts {
        self.opts
    }

    /// Replace the destination with `width * height` caller pixels.
    pub fn install_destination(
        &mut self,
        pixels: Vec<Bgra8>,
        width: u32,
        height: u32,
    ) -> QuadblitResult<()> {
        self.dest = Image::from_pixels(pixels, width, height)?;
        tracing::debug!(width, height, "destination installed");
        Ok(())
    }

    /// Replace the destination with an owned raster.
    pub fn install_image(&mut self, image: Image) {
        self.dest = image;
    }

    /// Current destination.
    pub fn destination(&self) -> &Image {
        &self.dest
    }

    /// Current destination, mutable.
    pub fn destination_mut(&mut self) -> &mut Image {
        &mut self.dest
    }

    /// Give up the engine and keep its destination.
    pub fn into_destination(self) -> Image {
        self.dest
    }

    /// Fill the destination with transparent black.
    pub fn clear(&mut self) {
        self.dest.clear();
    }

    /// Reallocate the destination as a transparent `width x height` raster.
    pub fn clear_to(&mut self, width: u32, height: u32) {
        self.dest.resize(width, height);
    }

    /// Fallible [`Engine::clear_to`] for sizes from untrusted input.
    pub fn try_clear_to(&mut self, width: u32, height: u32) -> QuadblitResult<()> {
        self.dest.try_resize(width, height)
    }

    /// Active composite operator.
    pub fn composite_mode(&self) -> CompositeOp {
        self.opts.composite
    }

    /// Select the composite operator.
    pub fn set_composite_mode(&mut self, op: CompositeOp) {
        self.opts.composite = op;
    }

    /// Select the composite operator by id. Unknown ids keep the current operator.
    pub fn set_composite_mode_id(&mut self, id: i64) {
        match CompositeOp::from_id(id) {
            Some(op) => self.opts.composite = op,
            None => tracing::debug!(id, "unknown composite id ignored"),
        }
    }

    /// Active blend mode.
    pub fn blend_mode(&self) -> BlendMode {
        self.opts.blend
    }

    /// Select the blend mode.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.opts.blend = mode;
    }

    /// Select the blend mode by id; unknown ids select [`BlendMode::Normal`].
    pub fn set_blend_mode_id(&mut self, id: i64) {
        self.opts.blend = BlendMode::from_id(id);
    }

    /// Select the blend mode by display name; unmatched names select [`BlendMode::Normal`].
    pub fn set_blend_mode_name(&mut self, name: &str) {
        let mode = BlendMode::from_name(name);
        if mode.name() != name {
            tracing::debug!(name, "unknown blend name, using Normal");
        }
        self.opts.blend = mode;
    }

    /// Active resample strategy.
    pub fn resample_mode(&self) -> Resample {
        self.opts.resample
    }

    /// Select the resample strategy.
    pub fn set_resample_mode(&mut self, resample: Resample) {
        self.opts.resample = resample;
    }

    /// Select the resample strategy by id (`0` nearest, `1` bilinear). Other ids are ignored.
    pub fn set_resample_mode_id(&mut self, id: i64) {
        match Resample::from_id(id) {
            Some(r) => self.opts.resample = r,
            None => tracing::debug!(id, "unknown resample id ignored"),
        }
    }

    /// Affine draw of `src` onto the destination with the active modes.
    #[tracing::instrument(skip_all, fields(src_w = src.width(), src_h = src.height()))]
    pub fn draw(&mut self, src: &ImageView<'_>, params: &DrawParams) -> DrawStats {
        let EngineOpts {
            blend,
            composite,
            resample,
        } = self.opts;
        draw_affine(&mut self.dest, src, composite, blend, resample, params)
    }

    /// Affine draw from a caller buffer of `width * height` pixels.
    pub fn draw_pixels(
        &mut self,
        src: &[Bgra8],
        width: u32,
        height: u32,
        params: &DrawParams,
    ) -> QuadblitResult<DrawStats> {
        let view = ImageView::new(src, width, height)?;
        Ok(self.draw(&view, params))
    }

    /// Perspective draw of `src` onto the destination with the active modes.
    #[tracing::instrument(skip_all, fields(src_w = src.width(), src_h = src.height()))]
    pub fn draw_perspective(&mut self, src: &ImageView<'_>, params: &PerspectiveParams) -> DrawStats {
        let EngineOpts {
            blend,
            composite,
            resample,
        } = self.opts;
        draw_perspective(&mut self.dest, src, composite, blend, resample, params)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/engine.rs"]
mod tests;
