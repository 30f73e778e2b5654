//! PL011 UART transmitter
//!
//! Polled, transmit-only console. Each byte waits for room in the transmit
//! FIFO and is then stored to the data register; no interrupts and no
//! state carried between calls.

use core::fmt;

use bringup_hal::poll::{self, PollPolicy};
use bringup_hal::uart::{until_nul, UartTx};
use bringup_hal::{DriverError, RegisterIo};

/// PL011 register offsets
pub mod reg {
    /// Data register (low byte transmits)
    pub const DR: usize = 0x00;
    /// Flag register
    pub const FR: usize = 0x18;
}

/// Flag register bits
pub mod flag {
    /// UART busy transmitting
    pub const BUSY: u32 = 1 << 3;
    /// Transmit FIFO full
    pub const TXFF: u32 = 1 << 5;
}

/// PL011 UART driver
#[derive(Debug)]
pub struct Pl011<R> {
    regs: R,
    poll: PollPolicy,
}

impl<R: RegisterIo> Pl011<R> {
    /// Create a driver that waits as long as the hardware needs
    pub fn new(regs: R) -> Self {
        Self::with_policy(regs, PollPolicy::Unbounded)
    }

    /// Create a driver with an explicit poll policy
    ///
    /// A bounded policy makes every wait fail with
    /// [`DriverError::PeripheralTimeout`] instead of spinning forever.
    pub fn with_policy(regs: R, poll: PollPolicy) -> Self {
        Self { regs, poll }
    }

    /// Active poll policy
    pub fn policy(&self) -> PollPolicy {
        self.poll
    }

    /// Check the transmit-FIFO-full flag once
    pub fn is_tx_full(&mut self) -> bool {
        self.regs.any_set(reg::FR, flag::TXFF)
    }

    /// Transmit one byte
    ///
    /// Spins while TXFF is set, then writes `c` to DR. Under
    /// [`PollPolicy::Unbounded`] this never returns an error.
    pub fn put_char(&mut self, c: u8) -> Result<(), DriverError> {
        if let Err(e) = poll::wait_while_set(&mut self.regs, reg::FR, flag::TXFF, self.poll) {
            warn!("UART TX FIFO stuck full, dropping byte {=u8:#x}", c);
            return Err(e);
        }
        self.regs.write32(reg::DR, u32::from(c));
        Ok(())
    }

    /// Transmit a NUL-terminated string
    ///
    /// Sends every byte before the first NUL; a slice without one is sent
    /// whole. Empty input sends nothing. Stops at the first error.
    pub fn put_string(&mut self, s: &[u8]) -> Result<(), DriverError> {
        for &c in until_nul(s) {
            self.put_char(c)?;
        }
        Ok(())
    }

    /// Transmit a string slice
    pub fn put_str(&mut self, s: &str) -> Result<(), DriverError> {
        self.put_string(s.as_bytes())
    }

    /// Wait until the last byte has left the shift register
    pub fn flush(&mut self) -> Result<(), DriverError> {
        poll::wait_while_set(&mut self.regs, reg::FR, flag::BUSY, self.poll).map(|_| ())
    }

    /// Release the register block
    pub fn free(self) -> R {
        self.regs
    }
}

impl<R: RegisterIo> UartTx for Pl011<R> {
    type Error = DriverError;

    fn write_byte(&mut self, byte: u8) -> Result<(), DriverError> {
        self.put_char(byte)
    }

    fn flush(&mut self) -> Result<(), DriverError> {
        Pl011::flush(self)
    }
}

impl<R> embedded_io::ErrorType for Pl011<R> {
    type Error = DriverError;
}

impl<R: RegisterIo> embedded_io::Write for Pl011<R> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, DriverError> {
        // Raw bytes: NULs are data here, unlike put_string
        for &c in buf {
            self.put_char(c)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), DriverError> {
        Pl011::flush(self)
    }
}

impl<R: RegisterIo> fmt::Write for Pl011<R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &c in s.as_bytes() {
            self.put_char(c).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
