//! Bring-up Hardware Abstraction Layer
//!
//! This crate defines the register-access discipline and the small set of
//! traits shared by the board-specific drivers. Nothing here touches real
//! hardware, so everything can be exercised on the host against
//! [`sim::SimRegisterFile`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Bring-up sequence (board crate)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bringup-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  MmioBlock    │       │ SimRegister-  │
//! │  (volatile)   │       │ File (tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`regs::RegisterIo`] - 32-bit register block access
//! - [`uart::UartTx`] - Blocking serial transmit
//! - [`display::PixelBuffer`] - Linear 16-bit framebuffer storage

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod color;
pub mod display;
pub mod error;
pub mod poll;
pub mod regs;
pub mod sim;
pub mod uart;

// Re-export key types at crate root for convenience
pub use color::Rgb565;
pub use display::{Geometry, PixelBuffer};
pub use error::DriverError;
pub use poll::PollPolicy;
pub use regs::RegisterIo;
pub use sim::SimRegisterFile;
pub use uart::UartTx;
