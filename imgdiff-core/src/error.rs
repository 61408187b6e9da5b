//! Error type shared by every operation in the core crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoded buffer ended before a fixed-width field could be read.
    #[error("truncated diff data: missing {needed}-byte {field}")]
    Truncated { field: &'static str, needed: usize },

    /// A color or pixel count field was negative.
    #[error("invalid {field} count: {count}")]
    NegativeCount { field: &'static str, count: i32 },

    /// Width or height field was negative.
    #[error("invalid dimensions: {width}x{height}")]
    NegativeDimension { width: i32, height: i32 },

    /// A list grew past what the 32-bit count field can hold.
    #[error("{field} count {count} does not fit in 32 bits")]
    CountOverflow { field: &'static str, count: usize },

    /// Raster dimensions exceed the 32-bit signed range of the format.
    #[error("image dimensions too large: {width}x{height}")]
    DimensionTooLarge { width: u32, height: u32 },

    /// A stored pixel lies outside the raster being written.
    #[error("pixel ({x}, {y}) outside {width}x{height} raster")]
    PixelOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Image codec failure (undecodable or unencodable raster).
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, DiffError>;
