// Calibration of the bench setup shared by all estimators.

// Licensed under the Apache License, Version 2.0

use crate::config::{circumference_from_diameter, HallConfig, OutputRange, PotConfig};

/// Bounds of the produced value
pub const OUTPUT_RANGE: OutputRange = OutputRange::new(1000, 10500);

/// 24 inch wheel
pub const WHEEL_DIAMETER_M: f32 = 24.0 * 2.54e-2;

pub const MAX_SPEED_KMH: f32 = 25.0;
pub const MIN_DETECTED_SPEED_KMH: f32 = 2.0;

/// Width of the hardware counter
pub const COUNTER_BITS: u8 = 16;

/// Potentiometer travel actually used, in 12-bit ADC counts
pub const POT_MIN_IN: u16 = 3740;
pub const POT_MAX_IN: u16 = 4095;

/// Hall estimator calibration for a counter running at `tick_rate_hz`.
///
/// Bind the result to a `const` item so that a broken calibration fails the build.
pub const fn hall_config(tick_rate_hz: u32) -> HallConfig {
    HallConfig {
        output: OUTPUT_RANGE,
        tick_rate_hz,
        counter_bits: COUNTER_BITS,
        wheel_circumference_m: circumference_from_diameter(WHEEL_DIAMETER_M),
        max_speed_kmh: MAX_SPEED_KMH,
        min_detected_speed_kmh: MIN_DETECTED_SPEED_KMH,
    }
    .validated()
}

pub const POT_CONFIG: PotConfig = PotConfig {
    output: OUTPUT_RANGE,
    min_in: POT_MIN_IN,
    max_in: POT_MAX_IN,
}
.validated();

#[cfg(test)]
mod tests {
    use super::*;

    // Evaluated at compile time
    const BENCH: HallConfig = hall_config(15_625);

    #[test]
    fn bench_calibration_is_valid() {
        assert_eq!(BENCH.check(), Ok(BENCH));
        assert_eq!(BENCH.output, OUTPUT_RANGE);
        assert!((BENCH.wheel_circumference_m - 1.9151).abs() < 1e-3);
    }
}
