//! Glue between files, encoded image bytes and the diff engine.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::compare::compare;
use crate::container::DiffContainer;
use crate::error::Result;

/// Read a whole file into memory.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Decode image bytes, guessing the format from their content.
pub fn image_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    Ok(image)
}

/// Encode a raster into `format`.
pub fn image_to_bytes(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

/// Decode two encoded images and diff them.
pub fn compare_bytes(first: &[u8], second: &[u8]) -> Result<DiffContainer> {
    let first = image_from_bytes(first)?;
    let second = image_from_bytes(second)?;
    compare(&first, &second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;
    use crate::raster::{unpack_argb, Raster};
    use image::RgbaImage;

    fn png(image: RgbaImage) -> Vec<u8> {
        image_to_bytes(&DynamicImage::ImageRgba8(image), ImageFormat::Png).unwrap()
    }

    #[test]
    fn png_roundtrip_keeps_argb() {
        let img = RgbaImage::from_fn(3, 2, |x, y| unpack_argb(0x8000_0000 | (x << 16) | y));
        let decoded = image_from_bytes(&png(img)).unwrap();
        assert_eq!(decoded.raster_size(), (3, 2));
        assert_eq!(decoded.argb_at(2, 1), 0x8002_0001);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = image_from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DiffError::Image(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file("/nonexistent/imgdiff/input.png").unwrap_err();
        assert!(matches!(err, DiffError::Io(_)));
    }

    #[test]
    fn compare_bytes_decodes_both_inputs() {
        let a = png(RgbaImage::from_fn(1, 1, |_, _| unpack_argb(0xFF00_0000)));
        let b = png(RgbaImage::from_fn(1, 1, |_, _| unpack_argb(0xFF01_0203)));
        let dc = compare_bytes(&a, &b).unwrap();
        assert_eq!(dc.color_count(), 1);
        assert_eq!(dc.iter().next().map(|(k, _)| (k.r, k.g, k.b)), Some((1, 2, 3)));
    }
}
