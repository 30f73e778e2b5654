//! Versatile Express HAL for bare-metal bring-up
//!
//! Concrete drivers for the two peripherals touched during bring-up on the
//! Cortex-A15 Versatile Express board:
//!
//! - [`pl011::Pl011`] - polled UART transmitter (console)
//! - [`pl111::Pl111`] - LCD controller, programmed once
//! - [`framebuffer::Framebuffer`] - checked RGB565 pixel surface
//! - [`display::DisplayInitializer`] - paints a test pattern then enables
//!   the controller
//!
//! Every driver is generic over [`bringup_hal::RegisterIo`] and
//! [`bringup_hal::PixelBuffer`]. On the board they run over [`mmio`]
//! volatile accessors; on the host over [`bringup_hal::SimRegisterFile`]
//! and plain slices.
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting and driver logging
//! - `serde` - Serialize/deserialize configuration types

#![no_std]

#[cfg(test)]
extern crate std;

// Must come first so the other modules see its macros
mod fmt;

pub mod bringup;
pub mod config;
pub mod display;
pub mod framebuffer;
pub mod mmio;
pub mod pl011;
pub mod pl111;

// Re-export shared types from bringup-hal
pub use bringup_hal::{DriverError, Geometry, PollPolicy, Rgb565};

pub use bringup::{bring_up, Peripherals};
pub use config::{BoardConfig, PanelTiming};
pub use display::DisplayInitializer;
pub use framebuffer::Framebuffer;
pub use pl011::Pl011;
pub use pl111::Pl111;
