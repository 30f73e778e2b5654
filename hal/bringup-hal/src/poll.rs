//! Busy-wait polling
//!
//! The drivers never use interrupts; every wait is a spin on a status
//! register. [`PollPolicy`] decides whether that spin may give up.

use crate::error::DriverError;
use crate::regs::RegisterIo;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Retry policy for status-register polling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PollPolicy {
    /// Spin until the hardware reports ready, however long that takes
    #[default]
    Unbounded,
    /// Read the status register at most this many times; every read must
    /// report busy to time out. `Bounded(0)` times out without touching
    /// the hardware.
    Bounded(u32),
}

impl PollPolicy {
    /// Check if this policy can time out
    pub const fn is_bounded(&self) -> bool {
        matches!(self, PollPolicy::Bounded(_))
    }
}

/// Spin while any bit of `mask` reads set in the register at `offset`
///
/// The register is read once per iteration. Returns the number of polls
/// that saw the bits set before they cleared.
///
/// # Errors
/// [`DriverError::PeripheralTimeout`] if `policy` is bounded and the limit
/// is reached while the bits are still set.
pub fn wait_while_set<R>(
    regs: &mut R,
    offset: usize,
    mask: u32,
    policy: PollPolicy,
) -> Result<u32, DriverError>
where
    R: RegisterIo + ?Sized,
{
    let mut busy_polls: u32 = 0;

    loop {
        if let PollPolicy::Bounded(limit) = policy {
            if busy_polls >= limit {
                return Err(DriverError::PeripheralTimeout);
            }
        }

        if !regs.any_set(offset, mask) {
            return Ok(busy_polls);
        }

        busy_polls = busy_polls.saturating_add(1);
        core::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimRegisterFile;

    const STATUS: usize = 0x18;
    const BUSY: u32 = 1 << 5;

    #[test]
    fn test_ready_immediately() {
        let mut regs: SimRegisterFile<8, 4> = SimRegisterFile::new();
        assert_eq!(wait_while_set(&mut regs, STATUS, BUSY, PollPolicy::Unbounded), Ok(0));
        assert_eq!(regs.reads_of(STATUS), 1);
    }

    #[test]
    fn test_ready_after_n_polls() {
        let mut regs: SimRegisterFile<8, 4> = SimRegisterFile::new();
        regs.hold_bits(STATUS, BUSY, 7);

        assert_eq!(wait_while_set(&mut regs, STATUS, BUSY, PollPolicy::Unbounded), Ok(7));
        // Seven busy reads plus the one that saw ready
        assert_eq!(regs.reads_of(STATUS), 8);
    }

    #[test]
    fn test_bounded_succeeds_within_limit() {
        let mut regs: SimRegisterFile<8, 4> = SimRegisterFile::new();
        regs.hold_bits(STATUS, BUSY, 3);

        assert_eq!(wait_while_set(&mut regs, STATUS, BUSY, PollPolicy::Bounded(4)), Ok(3));
    }

    #[test]
    fn test_bounded_times_out() {
        let mut regs: SimRegisterFile<8, 4> = SimRegisterFile::new();
        regs.stick_bits(STATUS, BUSY);

        assert_eq!(
            wait_while_set(&mut regs, STATUS, BUSY, PollPolicy::Bounded(10)),
            Err(DriverError::PeripheralTimeout)
        );
        assert_eq!(regs.reads_of(STATUS), 10);
    }

    #[test]
    fn test_bounded_zero_never_polls() {
        let mut regs: SimRegisterFile<8, 4> = SimRegisterFile::new();

        assert_eq!(
            wait_while_set(&mut regs, STATUS, BUSY, PollPolicy::Bounded(0)),
            Err(DriverError::PeripheralTimeout)
        );
        assert_eq!(regs.reads_of(STATUS), 0);
    }

    #[test]
    fn test_bounded_one_polls_once() {
        let mut regs: SimRegisterFile<8, 4> = SimRegisterFile::new();
        regs.stick_bits(STATUS, BUSY);

        assert_eq!(
            wait_while_set(&mut regs, STATUS, BUSY, PollPolicy::Bounded(1)),
            Err(DriverError::PeripheralTimeout)
        );
        assert_eq!(regs.reads_of(STATUS), 1);
    }

    #[test]
    fn test_other_bits_ignored() {
        let mut regs: SimRegisterFile<8, 4> = SimRegisterFile::new();
        regs.stick_bits(STATUS, 1 << 3);

        assert_eq!(wait_while_set(&mut regs, STATUS, BUSY, PollPolicy::Bounded(1)), Ok(0));
    }

    #[test]
    fn test_policy_default() {
        assert_eq!(PollPolicy::default(), PollPolicy::Unbounded);
        assert!(!PollPolicy::Unbounded.is_bounded());
        assert!(PollPolicy::Bounded(5).is_bounded());
    }
}
