use std::hash::{Hash, Hasher};

/// A four-channel color or color delta.
///
/// Channels hold either an unsigned 0..=255 value (when built from a packed
/// ARGB pixel) or a signed difference between two such values. Identity is
/// defined on red, green and blue only: two colors that differ only in `a`
/// compare equal and hash the same.
#[derive(Clone, Copy, Debug)]
pub struct PixelColor {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl PixelColor {
    pub fn new(r: i16, g: i16, b: i16, a: i16) -> Self {
        Self { r, g, b, a }
    }

    /// Split a packed `0xAARRGGBB` value into unsigned channels.
    pub fn from_argb(argb: u32) -> Self {
        Self {
            r: ((argb >> 16) & 0xFF) as i16,
            g: ((argb >> 8) & 0xFF) as i16,
            b: (argb & 0xFF) as i16,
            a: ((argb >> 24) & 0xFF) as i16,
        }
    }

    /// Recombine the channels as `a << 24 | r << 16 | g << 8 | b`.
    ///
    /// No masking is applied: a negative or out-of-byte channel bleeds into
    /// its neighbours. Mask each channel with `& 0xFF` first when a
    /// displayable pixel is required.
    pub fn to_argb(&self) -> u32 {
        let packed = (self.a as i32) << 24
            | (self.r as i32) << 16
            | (self.g as i32) << 8
            | self.b as i32;
        packed as u32
    }

    /// Channel-wise `other - self`, wrapping on 16-bit overflow.
    pub fn difference(&self, other: &PixelColor) -> PixelColor {
        PixelColor {
            r: other.r.wrapping_sub(self.r),
            g: other.g.wrapping_sub(self.g),
            b: other.b.wrapping_sub(self.b),
            a: other.a.wrapping_sub(self.a),
        }
    }

    /// Channel-wise `self + other`, wrapping on 16-bit overflow.
    pub fn sum(&self, other: &PixelColor) -> PixelColor {
        PixelColor {
            r: self.r.wrapping_add(other.r),
            g: self.g.wrapping_add(other.g),
            b: self.b.wrapping_add(other.b),
            a: self.a.wrapping_add(other.a),
        }
    }

    pub fn key(&self) -> ColorKey {
        ColorKey {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl PartialEq for PixelColor {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PixelColor {}

impl Hash for PixelColor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// The alpha-free identity of a [`PixelColor`], used as the map key of a
/// diff container. Orders by (r, g, b).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey {
    pub r: i16,
    pub g: i16,
    pub b: i16,
}

impl ColorKey {
    /// Rebuild a color from this key with the given alpha.
    pub fn with_alpha(self, a: i16) -> PixelColor {
        PixelColor::new(self.r, self.g, self.b, a)
    }
}
