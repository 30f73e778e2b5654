//! Board configuration
//!
//! Fixed addresses and controller words for the Cortex-A15 Versatile
//! Express board. Nothing here is discovered at runtime;
//! [`BoardConfig::VEXPRESS_A15`] is the single place the drivers get their
//! addresses from.

use bringup_hal::{Geometry, PollPolicy, Rgb565};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PL011 UART0 base address
pub const UART0_BASE: usize = 0x1C09_0000;

/// PL111 CLCD controller base address
pub const LCD_BASE: usize = 0x1002_0000;

/// Framebuffer physical address
pub const FRAMEBUFFER_BASE: u32 = 0x8000_0000;

/// Panel width in pixels
pub const SCREEN_WIDTH: usize = 800;

/// Panel height in pixels
pub const SCREEN_HEIGHT: usize = 600;

/// Console greeting sent during bring-up
pub const GREETING: &str = "Hello, Cortex-A15!\n";

/// Opaque PL111 timing and control words
///
/// Bit layouts are controller specific and the values come from the board
/// bring-up notes, not from a derivation. Do not recompute them without the
/// panel datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelTiming {
    /// TIM0: horizontal timing
    pub horizontal: u32,
    /// TIM1: vertical timing
    pub vertical: u32,
    /// TIM2: clock and signal polarity
    pub clock: u32,
    /// TIM3: line end control
    pub line_end: u32,
    /// CONTROL: enable, colour depth and panel type
    pub control: u32,
}

impl PanelTiming {
    /// 800x600 TFT, 16 bpp
    pub const VEXPRESS_SVGA: Self = Self {
        horizontal: 0x1313_A4C4,
        vertical: 0x0505_F657,
        clock: 0x071F_1800,
        line_end: 0x0000_0001,
        control: 0x0000_1829,
    };

    /// Timing words in TIM0..TIM3 order
    pub const fn timing_words(&self) -> [u32; 4] {
        [self.horizontal, self.vertical, self.clock, self.line_end]
    }
}

impl Default for PanelTiming {
    fn default() -> Self {
        Self::VEXPRESS_SVGA
    }
}

/// Everything bring-up needs to know about the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// UART register block
    pub uart_base: usize,
    /// LCD controller register block
    pub lcd_base: usize,
    /// Framebuffer physical address (the PL111 takes a 32-bit address)
    pub framebuffer_base: u32,
    /// Framebuffer extent
    pub geometry: Geometry,
    /// Controller words
    pub timing: PanelTiming,
    /// Console poll policy
    pub uart_poll: PollPolicy,
    /// Sent on the console first
    pub greeting: &'static str,
    /// Full-screen fill painted before the controller is enabled
    pub test_pattern: Rgb565,
}

impl BoardConfig {
    /// Cortex-A15 Versatile Express
    pub const VEXPRESS_A15: Self = Self {
        uart_base: UART0_BASE,
        lcd_base: LCD_BASE,
        framebuffer_base: FRAMEBUFFER_BASE,
        geometry: match Geometry::new(SCREEN_WIDTH, SCREEN_HEIGHT) {
            Ok(geometry) => geometry,
            Err(_) => panic!("invalid screen geometry"),
        },
        timing: PanelTiming::VEXPRESS_SVGA,
        uart_poll: PollPolicy::Unbounded,
        greeting: GREETING,
        test_pattern: Rgb565::RED,
    };
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::VEXPRESS_A15
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_words_preserved() {
        let timing = PanelTiming::default();
        assert_eq!(
            timing.timing_words(),
            [0x1313_A4C4, 0x0505_F657, 0x071F_1800, 0x0000_0001]
        );
        assert_eq!(timing.control, 0x1829);
    }

    #[test]
    fn test_board_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.uart_base, 0x1C09_0000);
        assert_eq!(config.lcd_base, 0x1002_0000);
        assert_eq!(config.framebuffer_base, 0x8000_0000);
        assert_eq!(config.geometry.width(), 800);
        assert_eq!(config.geometry.height(), 600);
        assert_eq!(config.test_pattern.raw(), 0xF800);
        assert_eq!(config.uart_poll, PollPolicy::Unbounded);
        assert!(config.greeting.ends_with('\n'));
    }
}
