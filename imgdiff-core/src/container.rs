use std::collections::BTreeMap;

use image::RgbaImage;

use crate::color::{ColorKey, PixelColor};
use crate::error::{DiffError, Result};
use crate::pixel::Pixel;
use crate::raster::{blank, unpack_argb, Raster};

/// Sparse per-pixel delta map.
///
/// Pixels are grouped under the RGB delta they share; each [`Pixel`] carries
/// its own position and alpha. Color keys iterate in (r, g, b) order and the
/// pixels of a key keep insertion order, so rendering and encoding are
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffContainer {
    width: i32,
    height: i32,
    pixels: BTreeMap<ColorKey, Vec<Pixel>>,
}

impl DiffContainer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: BTreeMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Append `pixel` under the RGB part of `color`. The alpha of `color` is
    /// not part of the key; the pixel's own alpha is what gets stored.
    /// Always returns `true`: there is no deduplication.
    pub fn put_pixel(&mut self, color: PixelColor, pixel: Pixel) -> bool {
        self.pixels.entry(color.key()).or_default().push(pixel);
        true
    }

    /// Pixels stored under the RGB part of `color`, empty if none.
    pub fn pixels(&self, color: &PixelColor) -> &[Pixel] {
        self.pixels
            .get(&color.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn color_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorKey, &[Pixel])> + '_ {
        self.pixels.iter().map(|(key, list)| (*key, list.as_slice()))
    }

    fn entries(&self) -> impl Iterator<Item = (ColorKey, &Pixel)> + '_ {
        self.pixels
            .iter()
            .flat_map(|(key, list)| list.iter().map(move |p| (*key, p)))
    }

    /// Render the magnitude of every stored delta as a standalone image.
    ///
    /// Each channel is `|delta| & 0xFF`, so the sign is lost; this is for
    /// visualization only. Unset pixels stay transparent black.
    pub fn as_image(&self) -> Result<RgbaImage> {
        let mut out = blank(self.width.max(0) as u32, self.height.max(0) as u32)?;

        for (key, pixel) in self.entries() {
            let (x, y) = locate(pixel, &out)?;
            let r = (key.r.unsigned_abs() & 0xFF) as u32;
            let g = (key.g.unsigned_abs() & 0xFF) as u32;
            let b = (key.b.unsigned_abs() & 0xFF) as u32;
            let a = (pixel.alpha().unsigned_abs() & 0xFF) as u32;
            out.put_pixel(x, y, unpack_argb(a << 24 | r << 16 | g << 8 | b));
        }

        Ok(out)
    }

    /// Add every stored delta back onto `base`.
    ///
    /// The result covers the larger of both extents. Pixels outside `base`
    /// have nothing to add to and receive the packed delta as-is.
    pub fn compose_onto<R: Raster>(&self, base: &R) -> Result<RgbaImage> {
        let (base_w, base_h) = base.raster_size();
        let mut out = blank(
            base_w.max(self.width.max(0) as u32),
            base_h.max(self.height.max(0) as u32),
        )?;

        for (key, pixel) in self.entries() {
            let (x, y) = locate(pixel, &out)?;
            let delta = key.with_alpha(pixel.alpha());

            let argb = if base.contains(x, y) {
                PixelColor::from_argb(base.argb_at(x, y))
                    .sum(&delta)
                    .to_argb()
            } else {
                delta.to_argb()
            };
            out.put_pixel(x, y, unpack_argb(argb));
        }

        Ok(out)
    }

    /// One-directional containment: `other` has every color key of `self`,
    /// every pixel list of `self` appears somewhere among `other`'s lists,
    /// and the dimensions match. Unlike `==` this does not look for extra
    /// entries in `other`.
    pub fn is_contained_in(&self, other: &DiffContainer) -> bool {
        let keys = self.pixels.keys().all(|k| other.pixels.contains_key(k));
        let values = self
            .pixels
            .values()
            .all(|list| other.pixels.values().any(|o| o == list));
        let sizes = self.width == other.width && self.height == other.height;

        keys && values && sizes
    }
}

fn locate(pixel: &Pixel, out: &RgbaImage) -> Result<(u32, u32)> {
    let (w, h) = out.dimensions();
    match (u32::try_from(pixel.x()), u32::try_from(pixel.y())) {
        (Ok(x), Ok(y)) if x < w && y < h => Ok((x, y)),
        _ => Err(DiffError::PixelOutOfBounds {
            x: pixel.x(),
            y: pixel.y(),
            width: w,
            height: h,
        }),
    }
}
