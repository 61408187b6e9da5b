//! Wire records of the `.diff` format. All integers are big-endian.
//!
//! ```text
//! header:  i32 width, i32 height, i32 color_count
//! color:   i16 r, i16 g, i16 b, i32 pixel_count   (color_count times)
//! pixel:   i32 x, i32 y, i16 alpha                 (pixel_count times per color)
//! ```

use crate::color::ColorKey;
use crate::pixel::Pixel;

pub const HEADER_SIZE: usize = 12;

/// Container header at the start of a `.diff` stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffHeader {
    pub width: i32,
    pub height: i32,
    pub color_count: i32,
}

impl DiffHeader {
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.width.to_be_bytes());
        buf[4..8].copy_from_slice(&self.height.to_be_bytes());
        buf[8..12].copy_from_slice(&self.color_count.to_be_bytes());
        buf
    }

    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Self {
        Self {
            width: i32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            height: i32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]),
            color_count: i32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]),
        }
    }
}

/// Per-color record: the RGB delta shared by the pixels that follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorRecord {
    pub key: ColorKey,
    pub pixel_count: i32,
}

impl ColorRecord {
    pub const SIZE: usize = 10; // 2 + 2 + 2 + 4

    pub fn to_bytes(&self) -> [u8; 10] {
        let mut buf = [0u8; 10];
        buf[0..2].copy_from_slice(&self.key.r.to_be_bytes());
        buf[2..4].copy_from_slice(&self.key.g.to_be_bytes());
        buf[4..6].copy_from_slice(&self.key.b.to_be_bytes());
        buf[6..10].copy_from_slice(&self.pixel_count.to_be_bytes());
        buf
    }

    pub fn from_bytes(buf: &[u8; 10]) -> Self {
        Self {
            key: ColorKey {
                r: i16::from_be_bytes([buf[0], buf[1]]),
                g: i16::from_be_bytes([buf[2], buf[3]]),
                b: i16::from_be_bytes([buf[4], buf[5]]),
            },
            pixel_count: i32::from_be_bytes([buf[6], buf[7], buf[8], buf[9]]),
        }
    }
}

/// Wire form of a single [`Pixel`].
pub struct PixelRecord;

impl PixelRecord {
    pub const SIZE: usize = 10; // 4 + 4 + 2

    pub fn to_bytes(pixel: &Pixel) -> [u8; 10] {
        let mut buf = [0u8; 10];
        buf[0..4].copy_from_slice(&pixel.x().to_be_bytes());
        buf[4..8].copy_from_slice(&pixel.y().to_be_bytes());
        buf[8..10].copy_from_slice(&pixel.alpha().to_be_bytes());
        buf
    }

    /// Returns the pixel together with the raw alpha field as written.
    pub fn from_bytes(buf: &[u8; 10]) -> (Pixel, i16) {
        let x = i32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let y = i32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let alpha = i16::from_be_bytes([buf[8], buf[9]]);
        (Pixel::new(x, y, alpha), alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_is_big_endian() {
        let header = DiffHeader {
            width: 2,
            height: 1,
            color_count: 0x0102_0304,
        };
        assert_eq!(
            header.to_bytes(),
            [0, 0, 0, 2, 0, 0, 0, 1, 1, 2, 3, 4]
        );
        assert_eq!(DiffHeader::from_bytes(&header.to_bytes()), header);
    }

    #[test]
    fn color_record_keeps_negative_channels() {
        let record = ColorRecord {
            key: ColorKey {
                r: -128,
                g: 0,
                b: 255,
            },
            pixel_count: 3,
        };
        let bytes = record.to_bytes();
        assert_eq!(&bytes[0..2], &[0xFF, 0x80]);
        assert_eq!(&bytes[4..6], &[0x00, 0xFF]);
        assert_eq!(ColorRecord::from_bytes(&bytes), record);
    }

    #[test]
    fn pixel_record_layout() {
        let pixel = Pixel::new(1, -1, 0xAB);
        let bytes = PixelRecord::to_bytes(&pixel);
        assert_eq!(bytes, [0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0xAB]);
        assert_eq!(PixelRecord::from_bytes(&bytes), (pixel, 0xAB));
    }
}
