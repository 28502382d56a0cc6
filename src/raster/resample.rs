//! Source sampling at real-valued coordinates.

use crate::foundation::core::{Bgra8, Point};
use crate::foundation::math::trunc_u8;
use crate::raster::image::ImageView;

/// Sampling strategy used when mapping destination pixels back into the source.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Resample {
    /// Round to the closest texel.
    Nearest,
    /// Weight the four surrounding texels.
    #[default]
    Bilinear,
}

impl Resample {
    /// `0` = nearest, `1` = bilinear, anything else `None`.
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::Nearest),
            1 => Some(Self::Bilinear),
            _ => None,
        }
    }

    /// Numeric selector of this strategy.
    pub fn id(self) -> i64 {
        self as i64
    }

    /// Sample `src` at `p`.
    #[inline]
    pub fn sample(self, src: &ImageView<'_>, p: Point) -> Bgra8 {
        match self {
            Self::Nearest => sample_nearest(src, p),
            Self::Bilinear => sample_bilinear(src, p),
        }
    }
}

/// Nearest texel: `trunc(coord + 0.5)` on each axis. Non-finite coordinates sample as
/// transparent.
pub fn sample_nearest(src: &ImageView<'_>, p: Point) -> Bgra8 {
    if !(p.x.is_finite() && p.y.is_finite()) {
        return Bgra8::TRANSPARENT;
    }
    src.pixel_safe((p.x + 0.5) as i64, (p.y + 0.5) as i64)
}

/// Bilinear blend of the four texels around `p`, each fetched independently (out-of-range
/// texels count as transparent black). Channels are summed in `f64` and truncated.
pub fn sample_bilinear(src: &ImageView<'_>, p: Point) -> Bgra8 {
    // Outside this open box all four taps are out of range or carry zero weight.
    let (w, h) = (f64::from(src.width()), f64::from(src.height()));
    if !(p.x > -1.0 && p.y > -1.0 && p.x < w && p.y < h) {
        return Bgra8::TRANSPARENT;
    }

    let (fx, fy) = (p.x.floor(), p.y.floor());
    let (x, y) = (fx as i64, fy as i64);
    let (dx, dy) = (p.x - fx, p.y - fy);

    let c1 = src.pixel_safe(x, y);
    let c2 = src.pixel_safe(x, y + 1);
    let c3 = src.pixel_safe(x + 1, y);
    let c4 = src.pixel_safe(x + 1, y + 1);

    let (w1, w2, w3, w4) = (
        (1.0 - dx) * (1.0 - dy),
        (1.0 - dx) * dy,
        dx * (1.0 - dy),
        dx * dy,
    );
    let mix = |a: u8, b: u8, c: u8, d: u8| {
        trunc_u8(w1 * f64::from(a) + w2 * f64::from(b) + w3 * f64::from(c) + w4 * f64::from(d))
    };

    Bgra8::new(
        mix(c1.b, c2.b, c3.b, c4.b),
        mix(c1.g, c2.g, c3.g, c4.g),
        mix(c1.r, c2.r, c3.r, c4.r),
        mix(c1.a, c2.a, c3.a, c4.a),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resample.rs"]
mod tests;
