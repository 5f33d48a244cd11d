// Calibration data for the estimators and its build-time validation.

// Every configuration is plain `const` data. `check()` reports the first broken
// invariant, `validated()` turns it into a panic so that a configuration bound
// in a `const` item fails the build instead of misbehaving on the bench.

// Licensed under the Apache License, Version 2.0

use core::f32::consts::PI;

/// Externally visible estimator result.
pub type OutputValue = i32;

/// Conversion factor from km/h to m/s.
const KMH_TO_MPS: f32 = 1.0 / 3.6;

/// Largest tick interval whose wrapping difference is still unambiguous in a u32.
const SAFE_PERIOD_MAX: f32 = 2_147_483_647.0; // 2^31 - 1

/// Closed interval the output value is bounded to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputRange {
    pub min: OutputValue,
    pub max: OutputValue,
}

impl OutputRange {
    pub const fn new(min: OutputValue, max: OutputValue) -> Self {
        Self { min, max }
    }

    /// Distance between the bounds.
    #[inline(always)]
    pub const fn span(&self) -> OutputValue {
        self.max - self.min
    }

    #[inline(always)]
    pub fn clamp(&self, value: OutputValue) -> OutputValue {
        value.clamp(self.min, self.max)
    }
}

/// Configuration invariant violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output maximum is not above the minimum.
    EmptyOutputRange,
    /// Hardware counter width outside 1..=16 bits.
    InvalidCounterWidth,
    /// Counter tick rate is zero.
    ZeroTickRate,
    /// Wheel circumference is zero, negative or NaN.
    NonPositiveCircumference,
    /// Minimal detected speed is zero, negative or NaN.
    NonPositiveMinSpeed,
    /// Minimal detected speed is not below the maximal one.
    MinSpeedNotBelowMax,
    /// Dead period rounds down to zero ticks.
    DeadPeriodTooShort,
    /// Dead period does not fit the wrapping tick arithmetic.
    DeadPeriodTooLong,
    /// Analog input span is empty.
    EmptyInputRange,
}

impl ConfigError {
    /// Aborts with a message naming the violated invariant.
    ///
    /// Evaluated inside a `const` item this becomes a compile error.
    pub const fn fail(self) -> ! {
        match self {
            Self::EmptyOutputRange => panic!("Output maximum must be above the output minimum"),
            Self::InvalidCounterWidth => panic!("Hardware counter width must be 1..=16 bits"),
            Self::ZeroTickRate => panic!("Counter tick rate must be set"),
            Self::NonPositiveCircumference => panic!("Wheel circumference must be positive"),
            Self::NonPositiveMinSpeed => panic!("Minimal detected speed must be set"),
            Self::MinSpeedNotBelowMax => {
                panic!("Minimal detected speed must be less than the maximal one")
            }
            Self::DeadPeriodTooShort => panic!("Wrong wheel dead period"),
            Self::DeadPeriodTooLong => panic!(
                "The wheel dead period is too long to detect it. Try to raise the minimal detected speed"
            ),
            Self::EmptyInputRange => panic!("Analog input maximum must be above the input minimum"),
        }
    }
}

/// Circumference of a wheel given its diameter in metres.
pub const fn circumference_from_diameter(diameter_m: f32) -> f32 {
    diameter_m * PI
}

/// Calibration of the Hall sensor estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HallConfig {
    /// Bounds of the produced value
    pub output: OutputRange,
    /// Free-running counter frequency (ticks per second), must match the timer setup
    pub tick_rate_hz: u32,
    /// Hardware counter width in bits
    pub counter_bits: u8,
    /// Distance travelled between two triggers, metres
    pub wheel_circumference_m: f32,
    /// Speed mapped to the output maximum, km/h
    pub max_speed_kmh: f32,
    /// Slowest speed still reported, km/h; slower counts as a stall
    pub min_detected_speed_kmh: f32,
}

impl HallConfig {
    /// Returns the configuration back when every invariant holds.
    pub const fn check(self) -> Result<Self, ConfigError> {
        if self.output.max <= self.output.min {
            return Err(ConfigError::EmptyOutputRange);
        }
        if self.counter_bits == 0 || self.counter_bits > 16 {
            return Err(ConfigError::InvalidCounterWidth);
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        // Negated comparisons also reject NaN
        if !(self.wheel_circumference_m > 0.0) {
            return Err(ConfigError::NonPositiveCircumference);
        }
        if !(self.min_detected_speed_kmh > 0.0) {
            return Err(ConfigError::NonPositiveMinSpeed);
        }
        if !(self.min_detected_speed_kmh < self.max_speed_kmh) {
            return Err(ConfigError::MinSpeedNotBelowMax);
        }

        let max_period_ticks = self.max_period_ticks();
        if max_period_ticks < 0.5 {
            return Err(ConfigError::DeadPeriodTooShort);
        }
        if !(max_period_ticks < SAFE_PERIOD_MAX) {
            return Err(ConfigError::DeadPeriodTooLong);
        }
        Ok(self)
    }

    /// Same as [`check`](Self::check) but panics on a violation.
    pub const fn validated(self) -> Self {
        match self.check() {
            Ok(config) => config,
            Err(err) => err.fail(),
        }
    }

    /// Number of distinct hardware counter values.
    #[inline(always)]
    pub const fn counter_range(&self) -> u32 {
        1u32 << self.counter_bits
    }

    #[inline(always)]
    pub const fn max_speed_mps(&self) -> f32 {
        self.max_speed_kmh * KMH_TO_MPS
    }

    #[inline(always)]
    pub const fn min_speed_mps(&self) -> f32 {
        self.min_detected_speed_kmh * KMH_TO_MPS
    }

    /// Ticks between two triggers at the minimal detected speed (unrounded).
    const fn max_period_ticks(&self) -> f32 {
        let max_period_sec = self.wheel_circumference_m / self.min_speed_mps();
        max_period_sec * self.tick_rate_hz as f32
    }

    /// Longest trigger interval before the wheel is considered stopped.
    pub const fn max_wait_ticks(&self) -> u32 {
        (self.max_period_ticks() + 0.5) as u32
    }

    /// Distance per trigger times tick rate: dividing it by a period in ticks gives m/s.
    pub const fn speed_numerator(&self) -> f32 {
        self.wheel_circumference_m * self.tick_rate_hz as f32
    }

    /// Output units per m/s.
    pub const fn output_per_mps(&self) -> f32 {
        self.output.span() as f32 / self.max_speed_mps()
    }
}

/// Calibration of the potentiometer estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PotConfig {
    pub output: OutputRange,
    /// Raw reading mapped to the output minimum
    pub min_in: u16,
    /// Raw reading mapped to the output maximum
    pub max_in: u16,
}

impl PotConfig {
    pub const fn check(self) -> Result<Self, ConfigError> {
        if self.output.max <= self.output.min {
            return Err(ConfigError::EmptyOutputRange);
        }
        if self.max_in <= self.min_in {
            return Err(ConfigError::EmptyInputRange);
        }
        Ok(self)
    }

    pub const fn validated(self) -> Self {
        match self.check() {
            Ok(config) => config,
            Err(err) => err.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> HallConfig {
        HallConfig {
            output: OutputRange::new(1000, 10500),
            tick_rate_hz: 15_625,
            counter_bits: 16,
            wheel_circumference_m: circumference_from_diameter(24.0 * 2.54e-2),
            max_speed_kmh: 25.0,
            min_detected_speed_kmh: 2.0,
        }
    }

    #[test]
    fn accepts_bench_wheel() {
        assert_eq!(base().check(), Ok(base()));
    }

    #[test]
    fn dead_period_matches_two_kmh() {
        // 1.915 m at 0.556 m/s is 3.447 s, times 15625 ticks/s
        let ticks = base().max_wait_ticks();
        assert!((53_850..=53_870).contains(&ticks), "ticks = {}", ticks);
    }

    #[test]
    fn counter_range_follows_width() {
        assert_eq!(base().counter_range(), 65_536);
        let narrow = HallConfig { counter_bits: 8, ..base() };
        assert_eq!(narrow.counter_range(), 256);
    }

    #[test]
    fn rejects_empty_output_range() {
        let cfg = HallConfig { output: OutputRange::new(500, 500), ..base() };
        assert_eq!(cfg.check(), Err(ConfigError::EmptyOutputRange));
    }

    #[test]
    fn rejects_counter_width() {
        let zero = HallConfig { counter_bits: 0, ..base() };
        let wide = HallConfig { counter_bits: 17, ..base() };
        assert_eq!(zero.check(), Err(ConfigError::InvalidCounterWidth));
        assert_eq!(wide.check(), Err(ConfigError::InvalidCounterWidth));
    }

    #[test]
    fn rejects_zero_tick_rate() {
        let cfg = HallConfig { tick_rate_hz: 0, ..base() };
        assert_eq!(cfg.check(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn rejects_bad_circumference() {
        let neg = HallConfig { wheel_circumference_m: -1.0, ..base() };
        let nan = HallConfig { wheel_circumference_m: f32::NAN, ..base() };
        assert_eq!(neg.check(), Err(ConfigError::NonPositiveCircumference));
        assert_eq!(nan.check(), Err(ConfigError::NonPositiveCircumference));
    }

    #[test]
    fn rejects_speed_limits() {
        let zero = HallConfig { min_detected_speed_kmh: 0.0, ..base() };
        let inverted = HallConfig { min_detected_speed_kmh: 25.0, ..base() };
        assert_eq!(zero.check(), Err(ConfigError::NonPositiveMinSpeed));
        assert_eq!(inverted.check(), Err(ConfigError::MinSpeedNotBelowMax));
    }

    #[test]
    fn rejects_dead_period_out_of_range() {
        // A tiny wheel on a slow counter never spans half a tick
        let short = HallConfig {
            tick_rate_hz: 1,
            wheel_circumference_m: 1e-3,
            ..base()
        };
        assert_eq!(short.check(), Err(ConfigError::DeadPeriodTooShort));

        // 1 mm/h on a 16 MHz counter
        let long = HallConfig {
            tick_rate_hz: 16_000_000,
            min_detected_speed_kmh: 1e-6,
            ..base()
        };
        assert_eq!(long.check(), Err(ConfigError::DeadPeriodTooLong));
    }

    #[test]
    #[should_panic(expected = "Minimal detected speed must be set")]
    fn validated_panics_on_violation() {
        HallConfig { min_detected_speed_kmh: -2.0, ..base() }.validated();
    }

    #[test]
    fn pot_rejects_empty_input_span() {
        let cfg = PotConfig {
            output: OutputRange::new(1000, 10500),
            min_in: 935,
            max_in: 935,
        };
        assert_eq!(cfg.check(), Err(ConfigError::EmptyInputRange));
    }

    #[test]
    fn output_range_clamps() {
        let range = OutputRange::new(1000, 10500);
        assert_eq!(range.clamp(-5), 1000);
        assert_eq!(range.clamp(20_000), 10500);
        assert_eq!(range.clamp(4242), 4242);
        assert_eq!(range.clamp(999), 1000);
        assert_eq!(range.span(), 9500);
    }
}
