//! Display bring-up
//!
//! Paints a full-screen test pattern, then programs the LCD controller to
//! scan it out. The pattern goes in first so the panel never shows
//! whatever the memory held at power-on.

use bringup_hal::{DriverError, PixelBuffer, RegisterIo, Rgb565};

use crate::config::PanelTiming;
use crate::framebuffer::Framebuffer;
use crate::pl111::Pl111;

/// One-shot display initializer
#[derive(Debug)]
pub struct DisplayInitializer<R, B> {
    lcd: Pl111<R>,
    framebuffer: Framebuffer<B>,
    framebuffer_base: u32,
    timing: PanelTiming,
}

impl<R: RegisterIo, B: PixelBuffer> DisplayInitializer<R, B> {
    /// Create an initializer
    ///
    /// `framebuffer_base` is the physical address the controller will scan
    /// out; it must be the address of `framebuffer`'s storage.
    pub fn new(
        lcd: Pl111<R>,
        framebuffer: Framebuffer<B>,
        framebuffer_base: u32,
        timing: PanelTiming,
    ) -> Self {
        Self {
            lcd,
            framebuffer,
            framebuffer_base,
            timing,
        }
    }

    /// Fill the framebuffer with `pattern`, then enable the controller
    pub fn initialize(&mut self, pattern: Rgb565) -> Result<(), DriverError> {
        self.framebuffer.fill_screen(pattern)?;
        self.configure_controller();
        Ok(())
    }

    /// Program the controller with this initializer's address and timing
    pub fn configure_controller(&mut self) {
        self.lcd
            .configure_controller(self.framebuffer_base, &self.timing);
    }

    /// Framebuffer for drawing after bring-up
    pub fn framebuffer(&mut self) -> &mut Framebuffer<B> {
        &mut self.framebuffer
    }

    /// LCD controller
    pub fn lcd(&mut self) -> &mut Pl111<R> {
        &mut self.lcd
    }

    /// Split back into controller and framebuffer
    pub fn into_parts(self) -> (Pl111<R>, Framebuffer<B>) {
        (self.lcd, self.framebuffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pl111::{control, reg};
    use bringup_hal::{Geometry, SimRegisterFile};

    type Sim = SimRegisterFile<8, 16>;

    /// Register file that snapshots the framebuffer when CONTROL is written
    struct SnoopLcd<'a> {
        regs: Sim,
        cells: &'a [core::cell::Cell<u16>],
        seen_at_enable: Option<std::vec::Vec<u16>>,
    }

    impl RegisterIo for SnoopLcd<'_> {
        fn read32(&mut self, offset: usize) -> u32 {
            self.regs.read32(offset)
        }

        fn write32(&mut self, offset: usize, value: u32) {
            if offset == reg::CONTROL && value & control::ENABLE != 0 {
                self.seen_at_enable = Some(self.cells.iter().map(|c| c.get()).collect());
            }
            self.regs.write32(offset, value);
        }
    }

    /// Framebuffer storage shared with [`SnoopLcd`]
    struct CellPixels<'a>(&'a [core::cell::Cell<u16>]);

    impl PixelBuffer for CellPixels<'_> {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn write_raw(&mut self, index: usize, raw: u16) {
            self.0[index].set(raw);
        }

        fn read_raw(&self, index: usize) -> u16 {
            self.0[index].get()
        }
    }

    #[test]
    fn test_initialize_fills_then_enables() {
        let geometry = Geometry::new(4, 3).unwrap();
        let cells: std::vec::Vec<core::cell::Cell<u16>> =
            (0..geometry.pixel_count()).map(|_| core::cell::Cell::new(0)).collect();

        let lcd = Pl111::new(SnoopLcd {
            regs: Sim::new(),
            cells: &cells,
            seen_at_enable: None,
        });
        let fb = Framebuffer::new(CellPixels(&cells), geometry).unwrap();
        let mut display = DisplayInitializer::new(lcd, fb, 0x8000_0000, PanelTiming::default());

        display.initialize(Rgb565::RED).unwrap();

        let (lcd, _) = display.into_parts();
        let snoop = lcd.free();
        // The controller saw a fully painted screen the moment it was enabled
        let seen = snoop.seen_at_enable.unwrap();
        assert!(seen.iter().all(|&c| c == 0xF800));

        let writes = snoop.regs.writes();
        assert_eq!(writes.len(), 6);
        assert_eq!(writes[0].offset, reg::UPBASE);
        assert_eq!(writes[0].value, 0x8000_0000);
        assert_eq!(writes[4].offset, reg::CONTROL);
    }

    #[test]
    fn test_draw_after_initialize() {
        let geometry = Geometry::new(4, 3).unwrap();
        let mut cells = [0u16; 12];
        let fb = Framebuffer::new(&mut cells[..], geometry).unwrap();
        let mut display =
            DisplayInitializer::new(Pl111::new(Sim::new()), fb, 0x8000_0000, PanelTiming::default());

        display.initialize(Rgb565::BLACK).unwrap();
        assert!(display.lcd().is_enabled());

        display.framebuffer().draw_pixel(1, 1, Rgb565::WHITE).unwrap();
        assert_eq!(
            display.framebuffer().draw_pixel(4, 0, Rgb565::WHITE),
            Err(DriverError::OutOfBounds)
        );

        let (_, fb) = display.into_parts();
        let cells = fb.into_inner();
        assert_eq!(cells[5], 0xFFFF);
        assert_eq!(cells.iter().filter(|&&c| c != 0).count(), 1);
    }
}
