//! PL111 colour LCD controller
//!
//! Programmed once at bring-up and never read back. The controller starts
//! fetching framebuffer memory with the programmed timings the moment the
//! enable bit lands, so the control register is always written last.

use bringup_hal::RegisterIo;

use crate::config::PanelTiming;

/// PL111 register offsets
pub mod reg {
    /// Horizontal timing
    pub const TIMING0: usize = 0x00;
    /// Vertical timing
    pub const TIMING1: usize = 0x04;
    /// Clock and signal polarity
    pub const TIMING2: usize = 0x08;
    /// Line end control
    pub const TIMING3: usize = 0x0C;
    /// Upper panel framebuffer base address
    pub const UPBASE: usize = 0x10;
    /// Control register
    pub const CONTROL: usize = 0x18;

    /// Timing registers in programming order
    pub const TIMING: [usize; 4] = [TIMING0, TIMING1, TIMING2, TIMING3];
}

/// Control register bits
pub mod control {
    /// Controller enable
    pub const ENABLE: u32 = 1 << 0;
    /// Panel power
    pub const POWER: u32 = 1 << 11;
}

/// PL111 driver
#[derive(Debug)]
pub struct Pl111<R> {
    regs: R,
}

impl<R: RegisterIo> Pl111<R> {
    /// Create a new PL111 driver
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Point the controller at a framebuffer and enable it
    ///
    /// Writes UPBASE, then TIMING0..TIMING3, then CONTROL. Fire-and-forget:
    /// nothing is read back.
    pub fn configure_controller(&mut self, framebuffer_base: u32, timing: &PanelTiming) {
        debug!("PL111 framebuffer at {=u32:#x}", framebuffer_base);
        self.regs.write32(reg::UPBASE, framebuffer_base);

        for (offset, word) in reg::TIMING.into_iter().zip(timing.timing_words()) {
            self.regs.write32(offset, word);
        }

        // Enable last: the controller starts scanning out immediately
        self.regs.write32(reg::CONTROL, timing.control);
        debug!("PL111 enabled, control {=u32:#x}", timing.control);
    }

    /// Check the enable bit
    pub fn is_enabled(&mut self) -> bool {
        self.regs.any_set(reg::CONTROL, control::ENABLE)
    }

    /// Power down the panel, then stop the controller
    pub fn disable(&mut self) {
        self.regs.modify32(reg::CONTROL, |v| v & !control::POWER);
        self.regs.modify32(reg::CONTROL, |v| v & !control::ENABLE);
    }

    /// Release the register block
    pub fn free(self) -> R {
        self.regs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bringup_hal::sim::RegisterWrite;
    use bringup_hal::SimRegisterFile;

    type Sim = SimRegisterFile<8, 16>;

    #[test]
    fn test_configure_write_order() {
        let mut lcd = Pl111::new(Sim::new());
        lcd.configure_controller(0x8000_0000, &PanelTiming::VEXPRESS_SVGA);

        let regs = lcd.free();
        assert_eq!(
            regs.writes(),
            &[
                RegisterWrite { offset: reg::UPBASE, value: 0x8000_0000 },
                RegisterWrite { offset: reg::TIMING0, value: 0x1313_A4C4 },
                RegisterWrite { offset: reg::TIMING1, value: 0x0505_F657 },
                RegisterWrite { offset: reg::TIMING2, value: 0x071F_1800 },
                RegisterWrite { offset: reg::TIMING3, value: 0x0000_0001 },
                RegisterWrite { offset: reg::CONTROL, value: 0x1829 },
            ]
        );
    }

    #[test]
    fn test_control_written_last_with_enable() {
        let mut lcd = Pl111::new(Sim::new());
        lcd.configure_controller(0x8000_0000, &PanelTiming::default());

        let regs = lcd.free();
        let writes = regs.writes();
        assert_eq!(writes.len(), 6);
        assert_eq!(regs.writes_to(reg::UPBASE).count(), 1);
        assert_eq!(regs.writes_to(reg::CONTROL).count(), 1);

        let last = writes[writes.len() - 1];
        assert_eq!(last.offset, reg::CONTROL);
        assert_ne!(last.value & control::ENABLE, 0);
    }

    #[test]
    fn test_configure_performs_no_reads() {
        let mut lcd = Pl111::new(Sim::new());
        lcd.configure_controller(0x8000_0000, &PanelTiming::default());

        let regs = lcd.free();
        for offset in reg::TIMING.into_iter().chain([reg::UPBASE, reg::CONTROL]) {
            assert_eq!(regs.reads_of(offset), 0);
        }
    }

    #[test]
    fn test_disable_powers_down_first() {
        let mut lcd = Pl111::new(Sim::new());
        lcd.configure_controller(0x8000_0000, &PanelTiming::default());
        assert!(lcd.is_enabled());

        lcd.disable();
        assert!(!lcd.is_enabled());

        let regs = lcd.free();
        let writes: std::vec::Vec<u32> = regs.writes_to(reg::CONTROL).collect();
        let powered_down = 0x1829 & !control::POWER;
        assert_eq!(writes, [0x1829, powered_down, powered_down & !control::ENABLE]);
    }
}
