#![cfg_attr(not(test), no_std)]

// Wheel speed estimation for a single Hall sensor, plus two stand-in estimators
// sharing the same interface. Hardware access goes through the traits in
// `peripherals`, so everything here also runs on the host.

// Licensed under the Apache License, Version 2.0

// Must stay first: the logging macros are textually scoped
mod fmt;

pub mod config;
pub mod hall_estimator;
pub mod linear_estimator;
pub mod math;
pub mod peripherals;
pub mod pot_estimator;
pub mod settings;

pub use config::{ConfigError, HallConfig, OutputRange, OutputValue, PotConfig};
pub use hall_estimator::{EstimatorState, HallRpmEstimator};
pub use linear_estimator::LinearRpmEstimator;
pub use pot_estimator::PotRpmEstimator;

/// Common interface of all estimators. The firmware picks one at build time.
pub trait RpmEstimator {
    /// Called exactly once before the first `rpm()`.
    fn setup(&mut self);

    /// Polls the estimator and returns the current output, always inside the
    /// configured output range.
    fn rpm(&mut self) -> OutputValue;
}
