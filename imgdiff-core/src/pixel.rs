/// A positioned alpha sample.
///
/// The alpha is stored masked to its low byte, so a negative alpha delta is
/// kept in its two's-complement byte form (`-1` becomes `255`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel {
    x: i32,
    y: i32,
    alpha: i16,
}

impl Pixel {
    pub fn new(x: i32, y: i32, alpha: i16) -> Self {
        Self {
            x,
            y,
            alpha: alpha & 0xFF,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn alpha(&self) -> i16 {
        self.alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_masked_to_a_byte() {
        assert_eq!(Pixel::new(0, 0, -1).alpha(), 255);
        assert_eq!(Pixel::new(0, 0, 0x1_7F).alpha(), 0x7F);
        assert_eq!(Pixel::new(0, 0, -256).alpha(), 0);
    }

    #[test]
    fn equality_covers_position_and_alpha() {
        assert_eq!(Pixel::new(3, 4, 10), Pixel::new(3, 4, 10));
        assert_eq!(Pixel::new(3, 4, -1), Pixel::new(3, 4, 255));
        assert_ne!(Pixel::new(3, 4, 10), Pixel::new(4, 3, 10));
        assert_ne!(Pixel::new(3, 4, 10), Pixel::new(3, 4, 11));
    }
}
