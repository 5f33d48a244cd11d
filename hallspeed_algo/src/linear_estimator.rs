// Synthetic estimator sweeping the output range up and down. Used to exercise
// whatever consumes the output without a turning wheel.

// Licensed under the Apache License, Version 2.0

use crate::config::{OutputRange, OutputValue};
use crate::RpmEstimator;

pub struct LinearRpmEstimator {
    output: OutputRange,
    rpm: OutputValue, // Value returned by the next call
    increase: bool,   // Sweep direction
}

impl LinearRpmEstimator {
    /// Output change per call
    pub const STEP: OutputValue = 100;

    pub const fn new(output: OutputRange) -> Self {
        Self {
            output,
            rpm: output.min,
            increase: true,
        }
    }
}

impl RpmEstimator for LinearRpmEstimator {
    fn setup(&mut self) {}

    fn rpm(&mut self) -> OutputValue {
        let res = self.rpm;

        if self.increase {
            self.rpm += Self::STEP;
            if self.rpm >= self.output.max {
                self.rpm = self.output.max;
                self.increase = false;
            }
        } else {
            self.rpm -= Self::STEP;
            if self.rpm <= self.output.min {
                self.rpm = self.output.min;
                self.increase = true;
            }
        }

        res
    }
}
