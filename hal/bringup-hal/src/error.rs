//! Driver error type
//!
//! Hardware is assumed present and responsive, so only two conditions are
//! recoverable. Anything else (unmapped or misaligned register offsets) is a
//! programming error.

use core::fmt;

/// Errors reported by the bring-up drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Pixel coordinate outside the framebuffer extent, or a geometry that
    /// does not fit its backing buffer
    OutOfBounds,
    /// A bounded poll ran out before the peripheral reported ready
    PeripheralTimeout,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::OutOfBounds => f.write_str("coordinate out of bounds"),
            DriverError::PeripheralTimeout => f.write_str("peripheral did not become ready"),
        }
    }
}

impl embedded_io::Error for DriverError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            DriverError::OutOfBounds => embedded_io::ErrorKind::InvalidInput,
            DriverError::PeripheralTimeout => embedded_io::ErrorKind::TimedOut,
        }
    }
}
