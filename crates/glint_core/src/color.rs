//! 24-bit colour with saturating arithmetic.

use std::ops::Add;

/// An 8-bit-per-channel colour.
///
/// All arithmetic saturates to `0..=255`; nothing ever wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into `0x00RRGGBB`.
    #[inline]
    pub fn pack(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Inverse of [`Rgb::pack`]; the top byte is ignored.
    pub fn unpack(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Multiply every channel by `k`, flooring and clamping to `0..=255`.
    ///
    /// Negative and NaN factors give black.
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self {
            r: scale_channel(self.r, k),
            g: scale_channel(self.g, k),
            b: scale_channel(self.b, k),
        }
    }

    /// Channel-wise sum, clamped at 255.
    #[inline]
    pub fn saturating_add(self, other: Rgb) -> Self {
        Self {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }
}

impl Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Rgb {
        self.saturating_add(rhs)
    }
}

impl From<Rgb> for u32 {
    fn from(color: Rgb) -> u32 {
        color.pack()
    }
}

#[inline]
fn scale_channel(c: u8, k: f64) -> u8 {
    let v = (f64::from(c) * k).floor();
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}
