//! UART serial transmit abstractions
//!
//! Transmit-only: the bring-up console never reads.

/// UART transmitter
///
/// Blocking trait for sending data over a UART interface.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write one byte, blocking until the hardware accepts it
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs. Bytes
    /// after the first failure are not sent.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Block until every accepted byte has left the transmitter
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Bytes of a NUL-terminated string, excluding the terminator
///
/// A slice without a NUL is returned whole.
pub fn until_nul(s: &[u8]) -> &[u8] {
    match s.iter().position(|&b| b == 0) {
        Some(end) => &s[..end],
        None => s,
    }
}
