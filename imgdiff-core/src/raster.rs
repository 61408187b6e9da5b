//! The narrow raster contract the diff engine depends on: dimensions plus
//! packed-ARGB reads. Output rasters are plain `RgbaImage`s.

use image::{GenericImageView, Rgba, RgbaImage};

use crate::error::{DiffError, Result};

pub trait Raster {
    /// `(width, height)` in pixels.
    fn raster_size(&self) -> (u32, u32);

    /// Packed `0xAARRGGBB` value at `(x, y)`. Callers stay within bounds.
    fn argb_at(&self, x: u32, y: u32) -> u32;

    fn contains(&self, x: u32, y: u32) -> bool {
        let (w, h) = self.raster_size();
        x < w && y < h
    }
}

impl<I> Raster for I
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    fn raster_size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn argb_at(&self, x: u32, y: u32) -> u32 {
        pack_argb(self.get_pixel(x, y))
    }
}

pub fn pack_argb(px: Rgba<u8>) -> u32 {
    let [r, g, b, a] = px.0;
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

pub fn unpack_argb(argb: u32) -> Rgba<u8> {
    Rgba([
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    ])
}

/// Fully transparent black raster. Fails when the RGBA buffer size does
/// not fit in memory addressing.
pub fn blank(width: u32, height: u32) -> Result<RgbaImage> {
    let fits = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_mul(4))
        .and_then(|bytes| usize::try_from(bytes).ok())
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !fits {
        return Err(DiffError::DimensionTooLarge { width, height });
    }
    Ok(RgbaImage::new(width, height))
}
