//! Scan loops: affine (bounding-box) draw and quad-clipped perspective draw.
//!
//! Both loops visit every destination pixel of a clipped rectangular region, map the pixel
//! back into source space, resample, and fuse the sample into the destination in place via
//! [`PixelCompositor`].

use crate::effects::blend::BlendMode;
use crate::effects::composite::CompositeOp;
use crate::foundation::core::{Point, Rect};
use crate::raster::image::{Image, ImageView};
use crate::raster::resample::Resample;
use crate::render::pipeline::PixelCompositor;
use crate::transform::homography::solve_homography;
use crate::transform::mat::Mat;
use crate::transform::quad::Quad;

fn default_alpha() -> f64 {
    1.0
}

/// Placement of an affine draw.
///
/// The source is centered on the destination center, scaled by `zoom`, rotated by
/// `rotation_deg` and shifted by `(offset_x, offset_y)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DrawParams {
    /// Horizontal shift in destination pixels.
    pub offset_x: f64,
    /// Vertical shift in destination pixels.
    pub offset_y: f64,
    /// Uniform scale. Negative values make the draw a no-op.
    pub zoom: f64,
    /// Opacity, clamped to `[0, 1]`.
    pub alpha: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            alpha: 1.0,
            rotation_deg: 0.0,
        }
    }
}

impl DrawParams {
    /// Set the shift.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the scale.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the opacity.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the rotation in degrees.
    pub fn with_rotation_deg(mut self, deg: f64) -> Self {
        self.rotation_deg = deg;
        self
    }

    /// Forward source-to-destination transform for a `src_w`x`src_h` source drawn onto a
    /// `dest_w`x`dest_h` destination.
    pub fn transform(&self, src_w: u32, src_h: u32, dest_w: u32, dest_h: u32) -> Mat {
        let mut m = Mat::IDENTITY;
        m.translate(-f64::from(src_w) * 0.5, -f64::from(src_h) * 0.5);
        m.scale(self.zoom, self.zoom);
        m.rotate(self.rotation_deg / 180.0 * std::f64::consts::PI);
        m.translate(
            f64::from(dest_w) * 0.5 + self.offset_x,
            f64::from(dest_h) * 0.5 + self.offset_y,
        );
        m
    }
}

/// Corner correspondence of a perspective draw.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PerspectiveParams {
    /// Destination corners, relative to the destination center.
    pub xy: Quad,
    /// Matching source corners in source pixels.
    pub uv: Quad,
    /// Opacity, clamped to `[0, 1]`.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl PerspectiveParams {
    /// Fully opaque correspondence `uv[i] -> xy[i]`.
    pub fn new(xy: Quad, uv: Quad) -> Self {
        Self { xy, uv, alpha: 1.0 }
    }

    /// Set the opacity.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Pixel counters of one draw call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Pixels inside the clipped scan region.
    pub pixels_visited: u64,
    /// Pixels that went through the compositor.
    pub pixels_written: u64,
}

/// Destination rectangle `[x0, x1) x [y0, y1)`, always inside the raster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanRegion {
    /// First column.
    pub x0: u32,
    /// First row.
    pub y0: u32,
    /// One past the last column.
    pub x1: u32,
    /// One past the last row.
    pub y1: u32,
}

impl ScanRegion {
    /// Clip the half-open box `[x0, x1) x [y0, y1)` to a `width`x`height` raster.
    pub fn clipped(x0: i64, y0: i64, x1: i64, y1: i64, width: u32, height: u32) -> Self {
        let clip = |v: i64, max: u32| -> u32 {
            // Clamped into `0..=max`, so the conversion cannot fail.
            u32::try_from(v.clamp(0, i64::from(max))).unwrap_or(max)
        };
        let (x0, y0) = (clip(x0, width), clip(y0, height));
        Self {
            x0,
            y0,
            x1: clip(x1, width).max(x0),
            y1: clip(y1, height).max(y0),
        }
    }

    /// `true` when no pixel is covered.
    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }

    /// Number of covered pixels.
    pub fn area(&self) -> u64 {
        u64::from(self.x1 - self.x0) * u64::from(self.y1 - self.y0)
    }
}

/// Scan region of an affine draw: the mapped source corners, truncated toward zero.
pub fn affine_region(forward: &Mat, src_w: u32, src_h: u32, dest: &Image) -> ScanRegion {
    let (w, h) = (f64::from(src_w), f64::from(src_h));
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]
    .map(|p| forward.transform(p));
    let r = Quad::new(corners).bounds();
    ScanRegion::clipped(
        r.x0 as i64,
        r.y0 as i64,
        r.x1 as i64,
        r.y1 as i64,
        dest.width(),
        dest.height(),
    )
}

/// Scan region of a perspective draw: `floor(min) ..= floor(max)` of the quad bounds.
///
/// Bounds beyond the `i64` range (including infinities) saturate, so such quads cover the
/// whole raster.
pub fn quad_region(quad: &Quad, dest: &Image) -> ScanRegion {
    let r: Rect = quad.bounds();
    ScanRegion::clipped(
        r.x0.floor() as i64,
        r.y0.floor() as i64,
        (r.x1.floor() as i64).saturating_add(1),
        (r.y1.floor() as i64).saturating_add(1),
        dest.width(),
        dest.height(),
    )
}

/// Draw `src` onto `dest` through the affine placement in `params`.
///
/// Negative zoom leaves `dest` untouched. Every pixel of the clipped bounding box of the
/// placed source is written; pixels that map outside the source sample as transparent.
pub fn draw_affine(
    dest: &mut Image,
    src: &ImageView<'_>,
    composite: CompositeOp,
    blend: BlendMode,
    resample: Resample,
    params: &DrawParams,
) -> DrawStats {
    if params.zoom < 0.0 {
        tracing::debug!(zoom = params.zoom, "negative zoom, draw skipped");
        return DrawStats::default();
    }

    let forward = params.transform(src.width(), src.height(), dest.width(), dest.height());
    let inv = forward.inverse();
    let region = affine_region(&forward, src.width(), src.height(), dest);
    tracing::debug!(?region, "affine scan region");
    if region.is_empty() {
        return DrawStats::default();
    }

    let compositor = PixelCompositor::new(composite, blend, params.alpha);
    let stride = dest.width() as usize;
    let pixels = dest.pixels_mut();
    for y in region.y0..region.y1 {
        let row = &mut pixels[y as usize * stride..][..stride];
        for x in region.x0..region.x1 {
            let p = inv.transform(Point::new(f64::from(x), f64::from(y)));
            let ps = resample.sample(src, p);
            let pd = &mut row[x as usize];
            *pd = compositor.apply(*pd, ps);
        }
    }

    DrawStats {
        pixels_visited: region.area(),
        pixels_written: region.area(),
    }
}

/// Draw `src` so that `params.uv[i]` lands on `params.xy[i]`.
///
/// Only pixels strictly inside the destination quad are touched; a zero-area quad draws
/// nothing.
pub fn draw_perspective(
    dest: &mut Image,
    src: &ImageView<'_>,
    composite: CompositeOp,
    blend: BlendMode,
    resample: Resample,
    params: &PerspectiveParams,
) -> DrawStats {
    let xy = params
        .xy
        .offset(f64::from(dest.width()) * 0.5, f64::from(dest.height()) * 0.5);
    let to_source = solve_homography(xy.corners(), params.uv.corners());
    let region = quad_region(&xy, dest);
    tracing::debug!(?region, "perspective scan region");

    let mut stats = DrawStats {
        pixels_visited: region.area(),
        pixels_written: 0,
    };
    if region.is_empty() {
        return stats;
    }

    let compositor = PixelCompositor::new(composite, blend, params.alpha);
    let stride = dest.width() as usize;
    let pixels = dest.pixels_mut();
    for y in region.y0..region.y1 {
        let row = &mut pixels[y as usize * stride..][..stride];
        for x in region.x0..region.x1 {
            let p = Point::new(f64::from(x), f64::from(y));
            if !xy.contains_strict(p) {
                continue;
            }
            let ps = resample.sample(src, to_source.map_perspective(p));
            let pd = &mut row[x as usize];
            *pd = compositor.apply(*pd, ps);
            stats.pixels_written += 1;
        }
    }
    stats
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
