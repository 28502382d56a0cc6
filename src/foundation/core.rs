use crate::foundation::math::trunc_u8;

pub use kurbo::{Point, Rect};

/// One 8-bit BGRA pixel with straight (unpremultiplied) color.
///
/// Field order matches the in-memory byte order `B, G, R, A`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Bgra8 {
    /// Blue channel.
    pub b: u8,
    /// Green channel.
    pub g: u8,
    /// Red channel.
    pub r: u8,
    /// Alpha (coverage) channel. Color channels are not scaled by it.
    pub a: u8,
}

impl Bgra8 {
    /// Fully transparent black, the value of every out-of-range sample.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a pixel from all four channels.
    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Build an opaque pixel (`a = 255`) from three color channels.
    pub const fn opaque(b: u8, g: u8, r: u8) -> Self {
        Self::new(b, g, r, 255)
    }

    /// Build a pixel from `[b, g, r, a]` bytes.
    pub const fn from_bytes(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    /// Return the pixel as `[b, g, r, a]` bytes.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Return the pixel with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.b, self.g, self.r, a)
    }
}

/// Luma/chroma triple used by the `luminosity` and `color` blend modes.
///
/// Coefficients follow ITU-R BT.601 (full range, chroma centred on zero).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YCbCr {
    /// Luma.
    pub y: i16,
    /// Blue-difference chroma.
    pub cb: i16,
    /// Red-difference chroma.
    pub cr: i16,
}

impl YCbCr {
    /// Build a triple from its components.
    pub const fn new(y: i16, cb: i16, cr: i16) -> Self {
        Self { y, cb, cr }
    }
}

impl From<Bgra8> for YCbCr {
    /// Components are truncated toward zero.
    fn from(px: Bgra8) -> Self {
        let (r, g, b) = (f64::from(px.r), f64::from(px.g), f64::from(px.b));
        Self {
            y: (0.299 * r + 0.587 * g + 0.114 * b) as i16,
            cb: (-0.168736 * r - 0.331264 * g + 0.5 * b) as i16,
            cr: (0.5 * r - 0.418688 * g - 0.081312 * b) as i16,
        }
    }
}

impl From<YCbCr> for Bgra8 {
    /// Alpha is always opaque; channels are clamped to `[0, 255]` and truncated.
    fn from(c: YCbCr) -> Self {
        let (y, cb, cr) = (f64::from(c.y), f64::from(c.cb), f64::from(c.cr));
        Self::opaque(
            trunc_u8(y + 1.772 * cb),
            trunc_u8(y - 0.344136 * cb - 0.714136 * cr),
            trunc_u8(y + 1.402 * cr),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
