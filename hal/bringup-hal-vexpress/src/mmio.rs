//! Volatile memory-mapped I/O
//!
//! The only place in the workspace that dereferences raw addresses. Every
//! access is a single `read_volatile`/`write_volatile` of the declared
//! width, so the compiler can neither elide, merge nor reorder them.

use core::ptr::{read_volatile, write_volatile};

use bringup_hal::{PixelBuffer, RegisterIo};

/// 32-bit register block at a fixed physical address
#[derive(Debug)]
pub struct MmioBlock {
    base: usize,
}

impl MmioBlock {
    /// Claim the register block at `base`
    ///
    /// # Safety
    /// `base` must be 4-byte aligned and map a register block covering every
    /// offset the owning driver uses. No other `MmioBlock` or reference may
    /// alias it for the lifetime of the returned value.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Physical base address
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl RegisterIo for MmioBlock {
    fn read32(&mut self, offset: usize) -> u32 {
        debug_assert!(offset % 4 == 0);
        // SAFETY: `new` guarantees the block is mapped and exclusively ours.
        unsafe { read_volatile((self.base + offset) as *const u32) }
    }

    fn write32(&mut self, offset: usize, value: u32) {
        debug_assert!(offset % 4 == 0);
        // SAFETY: as above.
        unsafe { write_volatile((self.base + offset) as *mut u32, value) }
    }
}

/// Framebuffer memory at a fixed physical address, 16 bits per cell
#[derive(Debug)]
pub struct MmioPixels {
    base: usize,
    len: usize,
}

impl MmioPixels {
    /// Claim `len` 16-bit cells starting at `base`
    ///
    /// # Safety
    /// `base` must be 2-byte aligned and `len` cells from it must be mapped
    /// memory owned by nothing else for the lifetime of the returned value.
    pub const unsafe fn new(base: usize, len: usize) -> Self {
        Self { base, len }
    }

    /// Physical base address
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl PixelBuffer for MmioPixels {
    fn len(&self) -> usize {
        self.len
    }

    fn write_raw(&mut self, index: usize, raw: u16) {
        assert!(index < self.len);
        // SAFETY: `index` is in range and `new` guarantees the region is ours.
        unsafe { write_volatile((self.base as *mut u16).add(index), raw) }
    }

    fn read_raw(&self, index: usize) -> u16 {
        assert!(index < self.len);
        // SAFETY: as above.
        unsafe { read_volatile((self.base as *const u16).add(index)) }
    }
}
