// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Microsecond clock derived from a free-running CPU cycle counter.
//!
//! The DWT cycle counter wraps every 2^32 cycles (about 20 s at 216 MHz). This wrapper converts
//! cycle deltas into microseconds and keeps its own wrapping 32-bit microsecond counter, so it
//! must be polled at least once per cycle-counter period. `Dispatcher::poll` reads it on every
//! main loop iteration, paused or running.

use cortex_m::peripheral::{DCB, DWT};

use crate::interface::MonotonicClock;

/// Wrapping microsecond counter fed by a 32-bit cycle source.
pub struct CycleClock<F> {
    read_cycles: F,
    cycles_per_us: u32,
    last_cycles: u32,
    /// Cycles not yet converted into a whole microsecond
    remainder: u32,
    micros: u32,
}

impl<F> CycleClock<F>
where
    F: FnMut() -> u32,
{
    /// `core_hz` is the frequency the cycle source counts at.
    pub fn new(mut read_cycles: F, core_hz: u32) -> Self {
        let last_cycles = read_cycles();
        Self {
            read_cycles,
            cycles_per_us: (core_hz / 1_000_000).max(1),
            last_cycles,
            remainder: 0,
            micros: 0,
        }
    }
}

impl CycleClock<fn() -> u32> {
    /// Start the DWT cycle counter and build a clock on it.
    pub fn dwt(dcb: &mut DCB, dwt: &mut DWT, core_hz: u32) -> Self {
        dcb.enable_trace();
        DWT::unlock();
        dwt.enable_cycle_counter();

        Self::new(DWT::cycle_count, core_hz)
    }
}

impl<F> MonotonicClock for CycleClock<F>
where
    F: FnMut() -> u32,
{
    fn now_micros(&mut self) -> u32 {
        let cycles = (self.read_cycles)();
        let delta = cycles.wrapping_sub(self.last_cycles);
        self.last_cycles = cycles;

        let total = self.remainder as u64 + delta as u64;
        let whole = total / self.cycles_per_us as u64;
        self.remainder = (total % self.cycles_per_us as u64) as u32;
        self.micros = self.micros.wrapping_add(whole as u32);

        self.micros
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn counts_microseconds_from_cycles() {
        let cycles = Cell::new(0u32);
        let mut clock = CycleClock::new(|| cycles.get(), 216_000_000);

        cycles.set(216 * 500);
        assert_eq!(clock.now_micros(), 500);

        cycles.set(216 * 1500);
        assert_eq!(clock.now_micros(), 1500);
    }

    #[test]
    fn keeps_fractional_cycles() {
        let cycles = Cell::new(0u32);
        let mut clock = CycleClock::new(|| cycles.get(), 2_000_000);

        cycles.set(3);
        assert_eq!(clock.now_micros(), 1);
        cycles.set(4);
        assert_eq!(clock.now_micros(), 2);
    }

    #[test]
    fn survives_cycle_counter_wrap() {
        let cycles = Cell::new(u32::MAX - 99);
        let mut clock = CycleClock::new(|| cycles.get(), 1_000_000);

        cycles.set(100);
        assert_eq!(clock.now_micros(), 200);
    }

    #[test]
    fn microsecond_counter_wraps() {
        let cycles = Cell::new(0u32);
        let mut clock = CycleClock::new(|| cycles.get(), 1_000_000);

        cycles.set(u32::MAX);
        assert_eq!(clock.now_micros(), u32::MAX);
        cycles.set(9);
        assert_eq!(clock.now_micros(), 9);
    }
}
