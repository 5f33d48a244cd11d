// Converts the tick interval between two triggers into an output value.

// Conversion chain:
// - period in ticks -> period in seconds (divide by tick rate)
// - wheel circumference / period -> linear speed, m/s
// - speed clamped to the configured maximum (double triggers, electrical noise)
// - speed scaled linearly onto the output range
//
// The circumference and tick rate are folded into one numerator and the output
// scale is precomputed, so a conversion costs one division and one multiply.

// Licensed under the Apache License, Version 2.0

use crate::config::{HallConfig, OutputRange, OutputValue};
use crate::math::round_to_int;

/// Pure period-to-output mapping for a fixed calibration.
#[derive(Clone, Copy, Debug)]
pub struct PeriodConverter {
    output: OutputRange,
    speed_numerator: f32, // circumference * tick rate, m*ticks/s
    max_speed_mps: f32,   // Speed mapped to output.max
    output_per_mps: f32,  // Output units per m/s
}

impl PeriodConverter {
    pub const fn new(config: &HallConfig) -> Self {
        Self {
            output: config.output,
            speed_numerator: config.speed_numerator(),
            max_speed_mps: config.max_speed_mps(),
            output_per_mps: config.output_per_mps(),
        }
    }

    /// Output for a trigger at `tick` following one at `previous`.
    pub fn on_trigger(&self, tick: u32, previous: u32) -> OutputValue {
        self.from_period(tick.wrapping_sub(previous))
    }

    /// Output for a period given in ticks.
    pub fn from_period(&self, period_ticks: u32) -> OutputValue {
        // Same tick twice: fastest representable speed
        if period_ticks == 0 {
            return self.output.max;
        }

        let speed = self.speed_mps(period_ticks).min(self.max_speed_mps);
        let output = self.output.min as f32 + speed * self.output_per_mps;

        self.output.clamp(round_to_int(output))
    }

    /// Linear wheel speed for a non-zero period, unclamped.
    #[inline(always)]
    pub fn speed_mps(&self, period_ticks: u32) -> f32 {
        self.speed_numerator / period_ticks as f32
    }

    /// Output range the results are bounded to
    pub fn output_range(&self) -> OutputRange {
        self.output
    }
}
