//! Owning and borrowed BGRA rasters.
//!
//! Pixels are stored row-major, `index = x + width * y`.

use crate::foundation::core::Bgra8;
use crate::foundation::error::{QuadblitError, QuadblitResult};

fn pixel_count(width: u32, height: u32) -> QuadblitResult<usize> {
    usize::try_from(u64::from(width) * u64::from(height))
        .map_err(|_| QuadblitError::validation(format!("raster {width}x{height} is too large")))
}

fn read_safe(data: &[Bgra8], width: u32, height: u32, x: i64, y: i64) -> Bgra8 {
    if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
        return Bgra8::TRANSPARENT;
    }
    data[x as usize + width as usize * y as usize]
}

/// Owned, mutable raster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    data: Vec<Bgra8>,
    width: u32,
    height: u32,
}

impl Image {
    /// Transparent-black raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let mut img = Self::default();
        img.resize(width, height);
        img
    }

    /// Transparent-black raster of the given size, or an error when it cannot be allocated.
    pub fn try_new(width: u32, height: u32) -> QuadblitResult<Self> {
        let mut img = Self::default();
        img.try_resize(width, height)?;
        Ok(img)
    }

    /// Take ownership of `width * height` pixels.
    pub fn from_pixels(data: Vec<Bgra8>, width: u32, height: u32) -> QuadblitResult<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(QuadblitError::validation(format!(
                "expected {expected} pixels for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copy a `B, G, R, A` byte buffer.
    pub fn from_bgra_bytes(bytes: &[u8], width: u32, height: u32) -> QuadblitResult<Self> {
        if bytes.len() % 4 != 0 {
            return Err(QuadblitError::validation(format!(
                "bgra buffer length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        let data = bytes
            .chunks_exact(4)
            .map(|c| Bgra8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Self::from_pixels(data, width, height)
    }

    /// Copy an `image` crate RGBA buffer, swizzling to BGRA.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let data = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Bgra8::new(b, g, r, a)
            })
            .collect();
        Self {
            data,
            width: img.width(),
            height: img.height(),
        }
    }

    /// Copy into an `image` crate RGBA buffer.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let px = self.pixel(x, y);
            image::Rgba([px.r, px.g, px.b, px.a])
        })
    }

    /// Pixels as `B, G, R, A` bytes.
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|px| px.to_bytes()).collect()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` for a 0-area raster.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major pixel storage.
    pub fn pixels(&self) -> &[Bgra8] {
        &self.data
    }

    /// Mutable row-major pixel storage.
    pub fn pixels_mut(&mut self) -> &mut [Bgra8] {
        &mut self.data
    }

    /// Pixel at `(x, y)`. Panics when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Bgra8 {
        self.data[self.index(x, y)]
    }

    /// Pixel at `(x, y)`, or transparent black when out of range.
    pub fn pixel_safe(&self, x: i64, y: i64) -> Bgra8 {
        read_safe(&self.data, self.width, self.height, x, y)
    }

    /// Overwrite the pixel at `(x, y)`. Panics when out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Bgra8) {
        let i = self.index(x, y);
        self.data[i] = px;
    }

    /// Reallocate to `width x height` and fill with transparent black.
    pub fn resize(&mut self, width: u32, height: u32) {
        let n = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(usize::MAX);
        self.data.clear();
        self.data.resize(n, Bgra8::TRANSPARENT);
        self.width = width;
        self.height = height;
    }

    /// Like [`Image::resize`], but reports a size that cannot be allocated instead of
    /// aborting. The raster is unchanged on error.
    pub fn try_resize(&mut self, width: u32, height: u32) -> QuadblitResult<()> {
        let n = pixel_count(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(n).map_err(|e| {
            QuadblitError::validation(format!("cannot allocate {width}x{height} raster: {e}"))
        })?;
        data.resize(n, Bgra8::TRANSPARENT);
        self.data = data;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Fill with transparent black, keeping the size.
    pub fn clear(&mut self) {
        self.data.fill(Bgra8::TRANSPARENT);
    }

    /// Fill with one color.
    pub fn fill(&mut self, px: Bgra8) {
        self.data.fill(px);
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        x as usize + self.width as usize * y as usize
    }
}

/// Borrowed read-only raster, valid for the lifetime of the caller's buffer.
///
/// Out-of-range reads return transparent black instead of panicking.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    data: &'a [Bgra8],
    width: u32,
    height: u32,
}

impl<'a> ImageView<'a> {
    /// Wrap `width * height` pixels without copying.
    pub fn new(data: &'a [Bgra8], width: u32, height: u32) -> QuadblitResult<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(QuadblitError::validation(format!(
                "view expects {expected} pixels for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel storage.
    pub fn pixels(&self) -> &'a [Bgra8] {
        self.data
    }

    /// Pixel at `(x, y)`, or transparent black when out of range.
    pub fn pixel_safe(&self, x: i64, y: i64) -> Bgra8 {
        read_safe(self.data, self.width, self.height, x, y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/image.rs"]
mod tests;
