// Licensed under the Apache License, Version 2.0

use crate::config::{HallConfig, OutputValue};

/// Detects a wheel that stopped producing triggers.
///
/// The dead period is the trigger interval at the minimal detected speed. Its
/// range is checked by [`HallConfig::check`], which keeps it below 2^31 ticks so
/// the wrapping difference of two extended tick counts stays unambiguous.
#[derive(Clone, Copy, Debug)]
pub struct StallWatchdog {
    max_wait_ticks: u32,
    floor: OutputValue,
}

impl StallWatchdog {
    pub const fn new(config: &HallConfig) -> Self {
        Self {
            max_wait_ticks: config.max_wait_ticks(),
            floor: config.output.min,
        }
    }

    /// Returns the floor output once `now` is more than the dead period past `last_trigger`.
    pub fn check_stall(&self, now: u32, last_trigger: u32) -> Option<OutputValue> {
        (now.wrapping_sub(last_trigger) > self.max_wait_ticks).then_some(self.floor)
    }

    /// Getter for the dead period
    pub fn max_wait_ticks(&self) -> u32 {
        self.max_wait_ticks
    }
}
