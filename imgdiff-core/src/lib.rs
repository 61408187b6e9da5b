pub mod color;
pub mod compare;
pub mod container;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod handler;
pub mod pixel;
pub mod raster;

pub use color::{ColorKey, PixelColor};
pub use compare::compare;
pub use container::DiffContainer;
pub use error::{DiffError, Result};
pub use pixel::Pixel;
pub use raster::Raster;

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use crate::raster::unpack_argb;
    use crate::*;

    fn image(width: u32, height: u32, f: impl Fn(u32, u32) -> u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| unpack_argb(f(x, y)))
    }

    #[test]
    fn black_white_to_grey_scenario() {
        let a = image(2, 1, |x, _| if x == 0 { 0xFF00_0000 } else { 0xFFFF_FFFF });
        let b = image(2, 1, |x, _| if x == 0 { 0xFF00_0000 } else { 0xFF7F_7F7F });

        let dc = compare(&a, &b).unwrap();
        assert_eq!((dc.width(), dc.height()), (2, 1));

        let nonzero: Vec<(ColorKey, &[Pixel])> = dc
            .iter()
            .filter(|(k, _)| (k.r, k.g, k.b) != (0, 0, 0))
            .collect();
        assert_eq!(nonzero.len(), 1);
        let (key, pixels) = nonzero[0];
        assert_eq!((key.r, key.g, key.b), (-128, -128, -128));
        assert_eq!(pixels, &[Pixel::new(1, 0, 0)]);

        // Encode and decode keep the single non-zero record exactly.
        let back = DiffContainer::from_bytes(&dc.to_bytes().unwrap()).unwrap();
        assert_eq!(back, dc);
        assert_eq!(back.pixels(&PixelColor::new(-128, -128, -128, 0)), &[Pixel::new(1, 0, 0)]);

        // Rendering shows magnitude only.
        let rendered = dc.as_image().unwrap();
        assert_eq!(rendered.argb_at(1, 0), 0x0080_8080);
        assert_eq!(rendered.argb_at(0, 0), 0);

        let rebuilt = back.compose_onto(&a).unwrap();
        assert_eq!(rebuilt, b);
    }

    #[test]
    fn compose_inverts_compare() {
        let a = image(7, 5, |x, y| {
            (0x40 + x * 20) << 24 | (x * 37 % 256) << 16 | (y * 51 % 256) << 8 | (x * y * 13 % 256)
        });
        let b = image(7, 5, |x, y| {
            (0xFF - y * 30) << 24 | (255 - x * 11) << 16 | (x * y * 7 % 256) << 8 | (y * 61 % 256)
        });

        let dc = compare(&a, &b).unwrap();
        let decoded = DiffContainer::from_bytes(&dc.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.compose_onto(&a).unwrap(), b);
    }

    #[test]
    fn compose_inverts_compare_across_sizes() {
        let a = image(2, 2, |_, _| 0xFF11_2233);
        let b = image(3, 2, |x, _| 0xFF00_0000 | x * 0x0101_01);

        let dc = compare(&a, &b).unwrap();
        assert_eq!(dc.compose_onto(&a).unwrap(), b);
    }

    #[test]
    fn truncated_encoding_does_not_decode() {
        let a = image(2, 1, |x, _| if x == 0 { 0xFF00_0000 } else { 0xFFFF_FFFF });
        let b = image(2, 1, |x, _| if x == 0 { 0xFF00_0000 } else { 0xFF7F_7F7F });
        let bytes = compare(&a, &b).unwrap().to_bytes().unwrap();

        let err = DiffContainer::from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, DiffError::Truncated { .. }));
    }

    #[test]
    fn decoded_container_differs_from_empty() {
        let a = image(1, 1, |_, _| 0xFF00_0000);
        let b = image(1, 1, |_, _| 0xFF01_0101);
        let dc = compare(&a, &b).unwrap();
        let back = DiffContainer::from_bytes(&dc.to_bytes().unwrap()).unwrap();

        assert_eq!(back, dc);
        assert_ne!(back, DiffContainer::new(1, 1));
    }
}
