//! RGB565 framebuffer
//!
//! A checked pixel surface over any [`PixelBuffer`]. Writes outside the
//! extent are rejected before they reach memory, so a bad coordinate can
//! never scribble over whatever follows the framebuffer.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor;
use embedded_graphics::Pixel;

use bringup_hal::{DriverError, Geometry, PixelBuffer, Rgb565};

/// Linear framebuffer, one 16-bit cell per pixel, row-major
#[derive(Debug)]
pub struct Framebuffer<B> {
    buffer: B,
    geometry: Geometry,
}

impl<B: PixelBuffer> Framebuffer<B> {
    /// Wrap `buffer` as a `geometry`-sized framebuffer
    ///
    /// # Errors
    /// [`DriverError::OutOfBounds`] if the buffer holds fewer cells than
    /// the geometry needs.
    pub fn new(buffer: B, geometry: Geometry) -> Result<Self, DriverError> {
        if buffer.len() < geometry.pixel_count() {
            return Err(DriverError::OutOfBounds);
        }
        Ok(Self { buffer, geometry })
    }

    /// Framebuffer extent
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.geometry.width()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.geometry.height()
    }

    /// Write one pixel at `(x, y)`
    ///
    /// # Errors
    /// [`DriverError::OutOfBounds`] unless `x < width` and `y < height`.
    /// Nothing is written in that case.
    pub fn draw_pixel(&mut self, x: usize, y: usize, color: Rgb565) -> Result<(), DriverError> {
        let index = self
            .geometry
            .index_of(x, y)
            .ok_or(DriverError::OutOfBounds)?;
        self.buffer.write_raw(index, color.raw());
        Ok(())
    }

    /// Read back the pixel at `(x, y)`
    pub fn read_pixel(&self, x: usize, y: usize) -> Result<Rgb565, DriverError> {
        let index = self
            .geometry
            .index_of(x, y)
            .ok_or(DriverError::OutOfBounds)?;
        Ok(Rgb565::from_raw(self.buffer.read_raw(index)))
    }

    /// Paint every pixel, row by row
    pub fn fill_screen(&mut self, color: Rgb565) -> Result<(), DriverError> {
        debug!(
            "filling {=usize}x{=usize} with {=u16:#x}",
            self.width(),
            self.height(),
            color.raw()
        );
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.draw_pixel(x, y, color)?;
            }
        }
        Ok(())
    }

    /// Borrow the backing storage
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Give back the backing storage
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

impl<B: PixelBuffer> OriginDimensions for Framebuffer<B> {
    fn size(&self) -> Size {
        let width = u32::try_from(self.width()).unwrap_or(u32::MAX);
        let height = u32::try_from(self.height()).unwrap_or(u32::MAX);
        Size::new(width, height)
    }
}

impl<B: PixelBuffer> DrawTarget for Framebuffer<B> {
    type Color = pixelcolor::Rgb565;
    type Error = core::convert::Infallible;

    /// Off-screen pixels are clipped, as embedded-graphics expects
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if let Some(index) = self.geometry.index_of(x, y) {
                self.buffer.write_raw(index, Rgb565::from(color).raw());
            }
        }
        Ok(())
    }
}
