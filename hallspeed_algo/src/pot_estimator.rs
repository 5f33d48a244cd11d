// Estimator driven by a potentiometer: the raw analog reading is mapped linearly
// onto the output range. Handy for bench tuning of whatever consumes the output.

// Licensed under the Apache License, Version 2.0

use crate::config::{OutputValue, PotConfig};
use crate::math::round_to_int;
use crate::peripherals::AnalogInput;
use crate::RpmEstimator;

pub struct PotRpmEstimator<A: AnalogInput> {
    input: A,
    config: PotConfig,
    mult: f32, // Output units per input count, set by setup()
}

impl<A: AnalogInput> PotRpmEstimator<A> {
    /// # Panics
    /// If `config` has an empty input or output span.
    pub fn new(config: PotConfig, input: A) -> Self {
        Self {
            input,
            config: config.validated(),
            mult: 0.0,
        }
    }
}

impl<A: AnalogInput> RpmEstimator for PotRpmEstimator<A> {
    fn setup(&mut self) {
        self.mult = self.config.output.span() as f32
            / (self.config.max_in - self.config.min_in) as f32;
        debug!("POT: {} output units per count", self.mult);
    }

    fn rpm(&mut self) -> OutputValue {
        let raw = self.input.read();
        let out = (raw as f32 - self.config.min_in as f32) * self.mult
            + self.config.output.min as f32;
        self.config.output.clamp(round_to_int(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputRange;

    struct FixedReading(u16);

    impl AnalogInput for FixedReading {
        fn read(&mut self) -> u16 {
            self.0
        }
    }

    fn estimator(raw: u16) -> PotRpmEstimator<FixedReading> {
        let config = PotConfig {
            output: OutputRange::new(1000, 10500),
            min_in: 935,
            max_in: 1023,
        };
        let mut est = PotRpmEstimator::new(config, FixedReading(raw));
        est.setup();
        est
    }

    #[test]
    fn maps_input_span_onto_output() {
        assert_eq!(estimator(935).rpm(), 1000);
        assert_eq!(estimator(1023).rpm(), 10500);
        // Midpoint 979 -> 1000 + 44 * 9500 / 88
        assert_eq!(estimator(979).rpm(), 5750);
    }

    #[test]
    fn clamps_outside_input_span() {
        assert_eq!(estimator(0).rpm(), 1000);
        assert_eq!(estimator(4095).rpm(), 10500);
    }

    #[test]
    fn follows_the_input() {
        let mut est = estimator(935);
        assert_eq!(est.rpm(), 1000);
        est.input.0 = 1023;
        assert_eq!(est.rpm(), 10500);
    }
}
