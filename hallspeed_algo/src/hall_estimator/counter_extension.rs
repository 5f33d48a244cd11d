// Extends a narrow free-running hardware counter into a 32-bit tick count.

// Overflows are counted by polling the hardware flag from `check_overflow()`.
// The caller has to poll faster than the counter wraps; a missed wrap silently
// loses one full counter range of time.

// Licensed under the Apache License, Version 2.0

use crate::peripherals::FreeRunningCounter;

/// Hardware counter plus the software overflow count.
pub struct CounterExtension<C: FreeRunningCounter> {
    counter: C,
    range: u32,     // Number of distinct raw values (2^bits)
    overflows: u32, // Wraps acknowledged so far
}

impl<C: FreeRunningCounter> CounterExtension<C> {
    pub fn new(counter: C, counter_bits: u8) -> Self {
        Self {
            counter,
            range: 1u32 << counter_bits,
            overflows: 0,
        }
    }

    /// Restarts the hardware counter and forgets previous overflows.
    pub fn start(&mut self) {
        self.counter.start();
        self.overflows = 0;
    }

    /// Current time in ticks, wrapping at 2^32.
    pub fn extended_ticks(&self) -> u32 {
        // Flag sampled on both sides of the raw read, all from the same instant
        let (pending_before, raw, pending_after) = critical_section::with(|_cs| {
            let before = self.counter.overflow_pending();
            let raw = self.counter.count();
            (before, raw, self.counter.overflow_pending())
        });
        let raw = raw as u32 & (self.range - 1);

        // A flag raised before the read is a wrap `check_overflow()` has not seen yet,
        // whatever the raw value. A flag raised only during the read belongs to the
        // read when the raw value is small, otherwise the wrap came after it.
        let mut overflows = self.overflows;
        if pending_before || (pending_after && raw < self.range / 2) {
            overflows = overflows.wrapping_add(1);
        }

        overflows.wrapping_mul(self.range).wrapping_add(raw)
    }

    /// Accounts a pending overflow exactly once. Returns `true` if one was found.
    pub fn check_overflow(&mut self) -> bool {
        critical_section::with(|_cs| {
            if self.counter.overflow_pending() {
                self.overflows = self.overflows.wrapping_add(1);
                self.counter.clear_overflow();
                true
            } else {
                false
            }
        })
    }

    /// Getter for acknowledged overflows
    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    /// Getter for the wrapped counter
    pub fn counter(&self) -> &C {
        &self.counter
    }
}
