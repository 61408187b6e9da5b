use tracing::debug;

use crate::color::PixelColor;
use crate::container::DiffContainer;
use crate::error::{DiffError, Result};
use crate::pixel::Pixel;
use crate::raster::Raster;

/// Compute the per-pixel delta that turns `first` into `second`.
///
/// The container spans the larger of both extents and is filled row by row.
/// Where only one image covers a pixel, the other side reads as transparent
/// black; pixels covered by neither image are skipped.
pub fn compare<A: Raster, B: Raster>(first: &A, second: &B) -> Result<DiffContainer> {
    let (w1, h1) = first.raster_size();
    let (w2, h2) = second.raster_size();
    let (width, height) = (w1.max(w2), h1.max(h2));

    let too_large = || DiffError::DimensionTooLarge { width, height };
    let mut container = DiffContainer::new(
        i32::try_from(width).map_err(|_| too_large())?,
        i32::try_from(height).map_err(|_| too_large())?,
    );

    for y in 0..height {
        for x in 0..width {
            let in_first = first.contains(x, y);
            let in_second = second.contains(x, y);
            if !in_first && !in_second {
                continue;
            }

            let before = sample(first, in_first, x, y);
            let after = sample(second, in_second, x, y);
            let delta = before.difference(&after);

            container.put_pixel(delta, Pixel::new(x as i32, y as i32, delta.a));
        }
    }

    if (w1, h1) != (w2, h2) {
        debug!(w1, h1, w2, h2, "compared images of different sizes");
    }
    debug!(
        width,
        height,
        colors = container.color_count(),
        pixels = container.pixel_count(),
        "computed diff"
    );

    Ok(container)
}

fn sample<R: Raster>(raster: &R, inside: bool, x: u32, y: u32) -> PixelColor {
    if inside {
        PixelColor::from_argb(raster.argb_at(x, y))
    } else {
        PixelColor::from_argb(0)
    }
}
