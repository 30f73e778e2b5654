//! RGB565 pixel color
//!
//! 16 bits per pixel: red in the top 5 bits, green in the next 6, blue in
//! the low 5.

use embedded_graphics::pixelcolor::{self, IntoStorage};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum red/blue channel value (5 bits)
pub const MAX_RB: u8 = 0x1F;

/// Maximum green channel value (6 bits)
pub const MAX_G: u8 = 0x3F;

/// Packed RGB565 color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(MAX_RB, MAX_G, MAX_RB);
    pub const RED: Self = Self::new(MAX_RB, 0, 0);
    pub const GREEN: Self = Self::new(0, MAX_G, 0);
    pub const BLUE: Self = Self::new(0, 0, MAX_RB);

    /// Pack three channels
    ///
    /// Values wider than their field are masked, so one channel can never
    /// bleed into its neighbour.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        let r = (r & MAX_RB) as u16;
        let g = (g & MAX_G) as u16;
        let b = (b & MAX_RB) as u16;
        Self((r << 11) | (g << 5) | b)
    }

    /// Wrap an already packed value
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Packed value as stored in the framebuffer
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Red channel (0-31)
    pub const fn r(self) -> u8 {
        (self.0 >> 11) as u8 & MAX_RB
    }

    /// Green channel (0-63)
    pub const fn g(self) -> u8 {
        (self.0 >> 5) as u8 & MAX_G
    }

    /// Blue channel (0-31)
    pub const fn b(self) -> u8 {
        self.0 as u8 & MAX_RB
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.raw()
    }
}

impl From<pixelcolor::Rgb565> for Rgb565 {
    fn from(color: pixelcolor::Rgb565) -> Self {
        Self::from_raw(color.into_storage())
    }
}

impl From<Rgb565> for pixelcolor::Rgb565 {
    fn from(color: Rgb565) -> Self {
        pixelcolor::Rgb565::new(color.r(), color.g(), color.b())
    }
}
