//! Board bring-up sequence
//!
//! Run once by the entry code before it parks the core: greet on the
//! console, then bring the display up.

use bringup_hal::uart::{until_nul, UartTx};
use bringup_hal::{DriverError, PixelBuffer, RegisterIo};

use crate::config::BoardConfig;
use crate::display::DisplayInitializer;
use crate::framebuffer::Framebuffer;
use crate::mmio::{MmioBlock, MmioPixels};
use crate::pl011::Pl011;
use crate::pl111::Pl111;

/// The board's two bring-up peripherals over real MMIO
#[derive(Debug)]
pub struct Peripherals {
    /// UART0 console
    pub uart: Pl011<MmioBlock>,
    /// LCD controller and framebuffer
    pub display: DisplayInitializer<MmioBlock, MmioPixels>,
}

impl Peripherals {
    /// Claim the peripherals described by `config`
    ///
    /// # Safety
    /// Call at most once. Every address in `config` must be mapped and
    /// the framebuffer region must hold `config.geometry` cells of RAM
    /// that nothing else uses.
    pub unsafe fn take(config: &BoardConfig) -> Result<Self, DriverError> {
        let uart = Pl011::with_policy(MmioBlock::new(config.uart_base), config.uart_poll);
        let lcd = Pl111::new(MmioBlock::new(config.lcd_base));
        let pixels = MmioPixels::new(
            config.framebuffer_base as usize,
            config.geometry.pixel_count(),
        );
        let framebuffer = Framebuffer::new(pixels, config.geometry)?;

        Ok(Self {
            uart,
            display: DisplayInitializer::new(
                lcd,
                framebuffer,
                config.framebuffer_base,
                config.timing,
            ),
        })
    }
}

/// Greet on the console, then paint the test pattern and enable the display
///
/// Stops at the first error; a console timeout leaves the display untouched.
pub fn bring_up<U, R, B>(
    uart: &mut U,
    display: &mut DisplayInitializer<R, B>,
    config: &BoardConfig,
) -> Result<(), DriverError>
where
    U: UartTx<Error = DriverError>,
    R: RegisterIo,
    B: PixelBuffer,
{
    uart.write_blocking(until_nul(config.greeting.as_bytes()))?;
    info!("console up");

    display.initialize(config.test_pattern)?;
    info!("display up");

    Ok(())
}
