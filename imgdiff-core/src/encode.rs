use std::io::Write;

use tracing::debug;

use crate::container::DiffContainer;
use crate::error::{DiffError, Result};
use crate::format::*;

impl DiffContainer {
    /// Serialize into the `.diff` layout: header, then one color record per
    /// key in (r, g, b) order, each followed by its pixels in insertion order.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let header = DiffHeader {
            width: self.width(),
            height: self.height(),
            color_count: count_field("color", self.color_count())?,
        };
        writer.write_all(&header.to_bytes())?;

        for (key, pixels) in self.iter() {
            let record = ColorRecord {
                key,
                pixel_count: count_field("pixel", pixels.len())?,
            };
            writer.write_all(&record.to_bytes())?;

            for pixel in pixels {
                writer.write_all(&PixelRecord::to_bytes(pixel))?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut buf)?;
        debug!(
            colors = self.color_count(),
            pixels = self.pixel_count(),
            bytes = buf.len(),
            "encoded diff container"
        );
        Ok(buf)
    }

    /// Exact size of the encoded form in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE
            + self.color_count() * ColorRecord::SIZE
            + self.pixel_count() * PixelRecord::SIZE
    }
}

fn count_field(field: &'static str, count: usize) -> Result<i32> {
    i32::try_from(count).map_err(|_| DiffError::CountOverflow { field, count })
}
