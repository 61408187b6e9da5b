use std::io::{ErrorKind, Read};

use tracing::debug;

use crate::container::DiffContainer;
use crate::error::{DiffError, Result};
use crate::format::*;

/// Reads a `.diff` stream back into a [`DiffContainer`].
///
/// Decoding is strict: a short read or a negative count fails the whole
/// decode and no partial container is returned.
pub struct DiffReader<R: Read> {
    reader: R,
}

impl<R: Read> DiffReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn read_container(mut self) -> Result<DiffContainer> {
        let header = DiffHeader::from_bytes(&self.read_record("header")?);
        if header.width < 0 || header.height < 0 {
            return Err(DiffError::NegativeDimension {
                width: header.width,
                height: header.height,
            });
        }
        if header.color_count < 0 {
            return Err(DiffError::NegativeCount {
                field: "color",
                count: header.color_count,
            });
        }

        let mut container = DiffContainer::new(header.width, header.height);

        for _ in 0..header.color_count {
            let record = ColorRecord::from_bytes(&self.read_record("color record")?);
            if record.pixel_count < 0 {
                return Err(DiffError::NegativeCount {
                    field: "pixel",
                    count: record.pixel_count,
                });
            }

            for _ in 0..record.pixel_count {
                let (pixel, alpha) = PixelRecord::from_bytes(&self.read_record("pixel record")?);
                container.put_pixel(record.key.with_alpha(alpha), pixel);
            }
        }

        debug!(
            width = header.width,
            height = header.height,
            colors = container.color_count(),
            pixels = container.pixel_count(),
            "decoded diff container"
        );

        Ok(container)
    }

    fn read_record<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => DiffError::Truncated { field, needed: N },
            _ => DiffError::Io(e),
        })?;
        Ok(buf)
    }
}

impl DiffContainer {
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        DiffReader::new(reader).read_container()
    }

    /// Decode a complete `.diff` buffer. Bytes after the last record are
    /// not inspected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(bytes)
    }
}
