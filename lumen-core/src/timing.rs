//! Single-wire LED pulse timing
//!
//! WS2812-style LEDs decode each bit from the width of a high pulse
//! followed by a low pulse. The durations below are converted once into
//! ticks of the pulse channel clock; every converted value must be
//! nonzero, otherwise the channel would emit malformed bits.

use crate::error::TimingError;

/// Channel tick rate the timing table is designed for (1 tick = 100 ns)
pub const REFERENCE_RESOLUTION_HZ: u32 = 10_000_000;

const NS_PER_SEC: u64 = 1_000_000_000;

/// Bit and reset durations in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    /// High time of a 0 bit
    pub t0h_ns: u32,
    /// Low time of a 0 bit
    pub t0l_ns: u32,
    /// High time of a 1 bit
    pub t1h_ns: u32,
    /// Low time of a 1 bit
    pub t1l_ns: u32,
    /// Idle low time that latches the data
    pub reset_ns: u32,
}

/// WS2812 timing
pub const WS2812_TIMING: BitTiming = BitTiming {
    t0h_ns: 350,
    t0l_ns: 800,
    t1h_ns: 700,
    t1l_ns: 600,
    reset_ns: 50_000,
};

/// Convert nanoseconds to ticks, rounding half up
pub fn ns_to_ticks(duration_ns: u32, resolution_hz: u32) -> Result<u32, TimingError> {
    let ticks = (duration_ns as u64 * resolution_hz as u64 + NS_PER_SEC / 2) / NS_PER_SEC;
    match ticks {
        0 => Err(TimingError::ZeroTicks),
        t if t > u32::MAX as u64 => Err(TimingError::DurationOverflow),
        t => Ok(t as u32),
    }
}

/// Bit timing converted to channel ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickTable {
    /// High ticks of a 0 bit
    pub t0h: u16,
    /// Low ticks of a 0 bit
    pub t0l: u16,
    /// High ticks of a 1 bit
    pub t1h: u16,
    /// Low ticks of a 1 bit
    pub t1l: u16,
    /// First half of the reset interval
    pub reset_first: u16,
    /// Second half of the reset interval
    pub reset_second: u16,
}

impl TickTable {
    /// Convert a timing table at the given resolution
    ///
    /// `max_ticks` is the largest value one symbol half can carry. The reset
    /// interval is spread over both halves of a single symbol.
    pub fn new(timing: &BitTiming, resolution_hz: u32, max_ticks: u16) -> Result<Self, TimingError> {
        let bit = |ns| -> Result<u16, TimingError> {
            let ticks = ns_to_ticks(ns, resolution_hz)?;
            u16::try_from(ticks)
                .ok()
                .filter(|t| *t <= max_ticks)
                .ok_or(TimingError::DurationOverflow)
        };

        let reset = ns_to_ticks(timing.reset_ns, resolution_hz)?;
        if reset > 2 * max_ticks as u32 {
            return Err(TimingError::DurationOverflow);
        }
        let reset_first = (reset / 2) as u16;
        let reset_second = (reset - reset / 2) as u16;
        if reset_first == 0 {
            // A single-tick reset cannot be split across two halves
            return Err(TimingError::ZeroTicks);
        }

        Ok(Self {
            t0h: bit(timing.t0h_ns)?,
            t0l: bit(timing.t0l_ns)?,
            t1h: bit(timing.t1h_ns)?,
            t1l: bit(timing.t1l_ns)?,
            reset_first,
            reset_second,
        })
    }

    /// Total reset ticks
    pub const fn reset_ticks(&self) -> u32 {
        self.reset_first as u32 + self.reset_second as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MAX: u16 = 0x7FFF;

    #[test]
    fn test_reference_ticks() {
        let table = TickTable::new(&WS2812_TIMING, REFERENCE_RESOLUTION_HZ, MAX).unwrap();
        // 350 ns at 100 ns/tick rounds half up to 4
        assert_eq!(table.t0h, 4);
        assert_eq!(table.t0l, 8);
        assert_eq!(table.t1h, 7);
        assert_eq!(table.t1l, 6);
        assert_eq!(table.reset_ticks(), 500);
        assert_eq!(table.reset_first, 250);
        assert_eq!(table.reset_second, 250);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(ns_to_ticks(149, 10_000_000), Ok(1));
        assert_eq!(ns_to_ticks(150, 10_000_000), Ok(2));
        assert_eq!(ns_to_ticks(49, 10_000_000), Err(TimingError::ZeroTicks));
        assert_eq!(ns_to_ticks(50, 10_000_000), Ok(1));
    }

    #[test]
    fn test_low_resolution_is_configuration_error() {
        // At 1 MHz a 350 ns pulse is 0.35 ticks
        assert_eq!(
            TickTable::new(&WS2812_TIMING, 1_000_000, MAX),
            Err(TimingError::ZeroTicks)
        );
    }

    #[test]
    fn test_reset_overflow() {
        // 50 us at 1 GHz is 50_000 ticks, more than one 15-bit half but
        // within two of them
        let table = TickTable::new(&WS2812_TIMING, 1_000_000_000, MAX).unwrap();
        assert_eq!(table.reset_ticks(), 50_000);

        let slow = BitTiming {
            reset_ns: 1_000_000,
            ..WS2812_TIMING
        };
        assert_eq!(
            TickTable::new(&slow, 1_000_000_000, MAX),
            Err(TimingError::DurationOverflow)
        );
    }

    proptest! {
        #[test]
        fn prop_reference_and_faster_resolutions_nonzero(hz in REFERENCE_RESOLUTION_HZ..=80_000_000u32) {
            let table = TickTable::new(&WS2812_TIMING, hz, MAX).unwrap();
            prop_assert!(table.t0h > 0 && table.t0l > 0);
            prop_assert!(table.t1h > 0 && table.t1l > 0);
            prop_assert!(table.reset_first > 0 && table.reset_second > 0);
        }

        #[test]
        fn prop_too_slow_resolution_fails(hz in 1u32..1_428_571) {
            // Below ~1.43 MHz the 350 ns high time rounds to zero ticks
            prop_assert_eq!(
                TickTable::new(&WS2812_TIMING, hz, MAX),
                Err(TimingError::ZeroTicks)
            );
        }
    }
}
