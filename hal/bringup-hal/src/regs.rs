//! Register block access
//!
//! Peripherals are a fixed base address plus byte offsets to 32-bit
//! registers. Drivers talk to them only through [`RegisterIo`], so the same
//! driver code runs against volatile MMIO on the board and against
//! [`crate::sim::SimRegisterFile`] on the host.

/// 32-bit register block
///
/// Implementations must perform every access as a single, non-elided,
/// non-reordered operation of exactly 32 bits (volatile on real hardware).
/// Offsets are byte offsets from the block base and are 4-byte aligned.
pub trait RegisterIo {
    /// Read the register at `offset`
    ///
    /// Takes `&mut self` because reads of status registers can have side
    /// effects (and the simulator counts them).
    fn read32(&mut self, offset: usize) -> u32;

    /// Write `value` to the register at `offset`
    fn write32(&mut self, offset: usize, value: u32);

    /// Read-modify-write the register at `offset`
    fn modify32<F>(&mut self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read32(offset);
        self.write32(offset, f(value));
    }

    /// Check whether any bit of `mask` is set
    fn any_set(&mut self, offset: usize, mask: u32) -> bool {
        self.read32(offset) & mask != 0
    }
}

impl<R: RegisterIo + ?Sized> RegisterIo for &mut R {
    fn read32(&mut self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&mut self, offset: usize, value: u32) {
        (**self).write32(offset, value)
    }
}

/// Single-bit mask helper
pub const fn bit(n: u32) -> u32 {
    1 << n
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-register mock
    struct MockRegs {
        regs: [u32; 2],
    }

    impl RegisterIo for MockRegs {
        fn read32(&mut self, offset: usize) -> u32 {
            self.regs[offset / 4]
        }

        fn write32(&mut self, offset: usize, value: u32) {
            self.regs[offset / 4] = value;
        }
    }

    #[test]
    fn test_modify_preserves_other_bits() {
        let mut regs = MockRegs { regs: [0, 0b1010] };
        regs.modify32(4, |v| v | bit(0));
        assert_eq!(regs.regs[1], 0b1011);
        regs.modify32(4, |v| v & !bit(3));
        assert_eq!(regs.regs[1], 0b0011);
    }

    #[test]
    fn test_any_set() {
        let mut regs = MockRegs {
            regs: [bit(5), 0],
        };
        assert!(regs.any_set(0, bit(5)));
        assert!(!regs.any_set(0, bit(3)));
        assert!(!regs.any_set(4, u32::MAX));
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn poke<R: RegisterIo>(mut regs: R) {
            regs.write32(0, 0xDEAD_BEEF);
        }

        let mut regs = MockRegs { regs: [0, 0] };
        poke(&mut regs);
        assert_eq!(regs.regs[0], 0xDEAD_BEEF);
    }
}
