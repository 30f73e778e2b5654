//! Simulated register file
//!
//! A host-side stand-in for a peripheral's register block. Every write is
//! recorded in order, every read is counted, and status bits can be held
//! set for a number of reads (or forever) to script when the "hardware"
//! becomes ready.

use heapless::Vec;

use crate::regs::RegisterIo;

/// Maximum number of concurrently held bit patterns
pub const MAX_HELD: usize = 4;

/// One recorded register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    /// Byte offset from the block base
    pub offset: usize,
    /// Value written
    pub value: u32,
}

/// Bits forced set on reads of one register
#[derive(Debug, Clone, Copy)]
struct HeldBits {
    offset: usize,
    mask: u32,
    /// Reads left before the bits clear (`None` = never)
    remaining: Option<u32>,
}

/// Simulated block of `WORDS` 32-bit registers with a `LOG`-entry write log
///
/// Offsets must be 4-byte aligned and below `WORDS * 4`; anything else is a
/// bug in the driver under test and panics.
#[derive(Debug, Clone)]
pub struct SimRegisterFile<const WORDS: usize, const LOG: usize> {
    regs: [u32; WORDS],
    reads: [u32; WORDS],
    writes: Vec<RegisterWrite, LOG>,
    held: Vec<HeldBits, MAX_HELD>,
}

impl<const WORDS: usize, const LOG: usize> Default for SimRegisterFile<WORDS, LOG> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WORDS: usize, const LOG: usize> SimRegisterFile<WORDS, LOG> {
    /// Create a register file with every register reading zero
    pub const fn new() -> Self {
        Self {
            regs: [0; WORDS],
            reads: [0; WORDS],
            writes: Vec::new(),
            held: Vec::new(),
        }
    }

    fn index(offset: usize) -> usize {
        assert!(offset % 4 == 0, "misaligned register offset {:#x}", offset);
        let index = offset / 4;
        assert!(index < WORDS, "unmapped register offset {:#x}", offset);
        index
    }

    /// Preset a register without recording a write
    pub fn preset(&mut self, offset: usize, value: u32) {
        self.regs[Self::index(offset)] = value;
    }

    /// Force `mask` set on the next `polls` reads of `offset`
    ///
    /// Models a peripheral that becomes ready after `polls` polls.
    pub fn hold_bits(&mut self, offset: usize, mask: u32, polls: u32) {
        self.push_held(offset, mask, Some(polls));
    }

    /// Force `mask` set on every read of `offset`
    ///
    /// Models a peripheral that never becomes ready.
    pub fn stick_bits(&mut self, offset: usize, mask: u32) {
        self.push_held(offset, mask, None);
    }

    /// Drop all held bits on `offset`
    pub fn release_bits(&mut self, offset: usize) {
        self.held.retain(|h| h.offset != offset);
    }

    fn push_held(&mut self, offset: usize, mask: u32, remaining: Option<u32>) {
        Self::index(offset);
        if self
            .held
            .push(HeldBits {
                offset,
                mask,
                remaining,
            })
            .is_err()
        {
            panic!("more than {} held bit patterns", MAX_HELD);
        }
    }

    /// Current stored value, without counting a read or applying held bits
    pub fn peek(&self, offset: usize) -> u32 {
        self.regs[Self::index(offset)]
    }

    /// Number of reads of `offset` so far
    pub fn reads_of(&self, offset: usize) -> u32 {
        self.reads[Self::index(offset)]
    }

    /// All writes, oldest first
    pub fn writes(&self) -> &[RegisterWrite] {
        &self.writes
    }

    /// Values written to `offset`, oldest first
    pub fn writes_to(&self, offset: usize) -> impl Iterator<Item = u32> + '_ {
        self.writes
            .iter()
            .filter(move |w| w.offset == offset)
            .map(|w| w.value)
    }

    /// Forget recorded writes and read counts (register values are kept)
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.reads = [0; WORDS];
    }
}

impl<const WORDS: usize, const LOG: usize> RegisterIo for SimRegisterFile<WORDS, LOG> {
    fn read32(&mut self, offset: usize) -> u32 {
        let index = Self::index(offset);
        self.reads[index] = self.reads[index].saturating_add(1);

        let mut value = self.regs[index];
        for held in self.held.iter_mut().filter(|h| h.offset == offset) {
            match held.remaining {
                None => value |= held.mask,
                Some(0) => {}
                Some(ref mut n) => {
                    value |= held.mask;
                    *n -= 1;
                }
            }
        }
        value
    }

    fn write32(&mut self, offset: usize, value: u32) {
        let index = Self::index(offset);
        self.regs[index] = value;
        if self.writes.push(RegisterWrite { offset, value }).is_err() {
            panic!("write log full ({} entries)", LOG);
        }
    }
}
