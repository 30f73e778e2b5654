//! Linear framebuffer abstractions
//!
//! A framebuffer is `width × height` 16-bit cells laid out row-major with no
//! padding between rows. [`PixelBuffer`] is the raw storage; [`Geometry`]
//! owns the coordinate-to-index mapping and its bounds check.

use crate::error::DriverError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw storage for 16-bit pixel cells
///
/// Callers only pass indices below [`PixelBuffer::len`]; implementations
/// may panic otherwise.
pub trait PixelBuffer {
    /// Number of cells
    fn len(&self) -> usize;

    /// Check if the buffer has no cells
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store one packed pixel
    fn write_raw(&mut self, index: usize, raw: u16);

    /// Load one packed pixel
    fn read_raw(&self, index: usize) -> u16;
}

impl PixelBuffer for [u16] {
    fn len(&self) -> usize {
        <[u16]>::len(self)
    }

    fn write_raw(&mut self, index: usize, raw: u16) {
        self[index] = raw;
    }

    fn read_raw(&self, index: usize) -> u16 {
        self[index]
    }
}

impl<const N: usize> PixelBuffer for [u16; N] {
    fn len(&self) -> usize {
        N
    }

    fn write_raw(&mut self, index: usize, raw: u16) {
        self[index] = raw;
    }

    fn read_raw(&self, index: usize) -> u16 {
        self[index]
    }
}

impl<B: PixelBuffer + ?Sized> PixelBuffer for &mut B {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn write_raw(&mut self, index: usize, raw: u16) {
        (**self).write_raw(index, raw)
    }

    fn read_raw(&self, index: usize) -> u16 {
        (**self).read_raw(index)
    }
}

/// Framebuffer extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGeometry"))]
pub struct Geometry {
    width: usize,
    height: usize,
}

/// Unchecked wire form of [`Geometry`]; deserialization goes through
/// [`Geometry::new`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGeometry {
    width: usize,
    height: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeometry> for Geometry {
    type Error = DriverError;

    fn try_from(raw: RawGeometry) -> Result<Self, DriverError> {
        Geometry::new(raw.width, raw.height)
    }
}

impl Geometry {
    /// Create a geometry
    ///
    /// # Errors
    /// [`DriverError::OutOfBounds`] if either extent is zero or the size
    /// in bytes overflows `usize`.
    pub const fn new(width: usize, height: usize) -> Result<Self, DriverError> {
        if width == 0 || height == 0 {
            return Err(DriverError::OutOfBounds);
        }
        let cells = match width.checked_mul(height) {
            Some(cells) => cells,
            None => return Err(DriverError::OutOfBounds),
        };
        match cells.checked_mul(core::mem::size_of::<u16>()) {
            Some(_) => Ok(Self { width, height }),
            None => Err(DriverError::OutOfBounds),
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Size in bytes at 16 bits per pixel
    pub const fn size_bytes(&self) -> usize {
        self.pixel_count() * core::mem::size_of::<u16>()
    }

    /// Check if a coordinate lies inside the extent
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Row-major cell index of `(x, y)`
    ///
    /// Returns `None` outside the extent. Both coordinates are checked
    /// separately; `x >= width` never wraps onto the next row.
    pub const fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if self.contains(x, y) {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}
