// Implements the Hall sensor wheel speed estimator: one magnet on the wheel passes
// a digital Hall sensor once per revolution, the interval between two passes gives
// the wheel speed, and the speed is mapped onto the output range.

// Key Features:
// - Extends a 16-bit free-running hardware counter to 32 bits across overflows
// - Detects the magnet arriving (far -> near) by comparing consecutive pin levels
// - Converts the tick interval between arrivals into speed and output value
// - Pins the output to its floor when the wheel stops (dead period)

// Detailed Operation:
// The estimator is polled by the main loop. Each poll samples the sensor; on a
// far -> near transition the extended tick count is read and the period since the
// previous arrival is converted into a fresh output value. After that, every poll
// acknowledges a pending counter overflow and checks whether the last arrival is
// older than the dead period, in which case the output drops to its minimum.
// The stalled state is left on the next arrival.
// The poll rate has to exceed the counter wrap rate, otherwise time is lost.

// Licensed under the Apache License, Version 2.0

pub mod counter_extension;
pub mod edge_detector;
pub mod period_converter;
pub mod stall_watchdog;

use self::counter_extension::CounterExtension;
use self::edge_detector::{EdgeDetector, Transition};
use self::period_converter::PeriodConverter;
use self::stall_watchdog::StallWatchdog;

use crate::config::{HallConfig, OutputValue};
use crate::peripherals::{FreeRunningCounter, ProximityInput};
use crate::RpmEstimator;

/// Represents whether the wheel is considered turning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EstimatorState {
    /// Output follows the last measured period
    Tracking,
    /// No trigger within the dead period, output pinned to the minimum
    Stalled,
}

/// Hall sensor estimator holding all measurement state.
pub struct HallRpmEstimator<C: FreeRunningCounter, P: ProximityInput> {
    counter: CounterExtension<C>, // 32-bit time base
    input: P,                     // Hall sensor
    edge: EdgeDetector,           // Remembered sensor level
    converter: PeriodConverter,
    watchdog: StallWatchdog,

    output: OutputValue, // Value returned by rpm()
    last_trigger: u32,   // Extended ticks at the last far -> near transition
    state: EstimatorState,
}

impl<C: FreeRunningCounter, P: ProximityInput> HallRpmEstimator<C, P> {
    /// Create a new estimator.
    ///
    /// # Arguments
    /// * `config` - Calibration, its `tick_rate_hz` must match the counter setup
    /// * `counter` - Free-running hardware counter
    /// * `input` - Hall sensor input
    ///
    /// # Panics
    /// If `config` violates an invariant, see [`HallConfig::check`].
    pub fn new(config: HallConfig, counter: C, input: P) -> Self {
        let config = config.validated();
        Self {
            counter: CounterExtension::new(counter, config.counter_bits),
            input,
            edge: EdgeDetector::new(false),
            converter: PeriodConverter::new(&config),
            watchdog: StallWatchdog::new(&config),

            output: config.output.min,
            last_trigger: 0,
            state: EstimatorState::Tracking,
        }
    }

    /// Getter for the last returned value
    pub fn output(&self) -> OutputValue {
        self.output
    }

    pub fn state(&self) -> EstimatorState {
        self.state
    }

    /// Sensor level seen on the last poll
    pub fn magnet_near(&self) -> bool {
        self.edge.is_near()
    }

    /// Getter for the extended tick count of the last trigger
    pub fn last_trigger(&self) -> u32 {
        self.last_trigger
    }

    /// Current extended tick count
    pub fn ticks(&self) -> u32 {
        self.counter.extended_ticks()
    }

    /// Getter for the dead period in ticks
    pub fn max_wait_ticks(&self) -> u32 {
        self.watchdog.max_wait_ticks()
    }

    /// Recomputes the output on a trigger.
    fn on_trigger(&mut self) {
        let now = self.counter.extended_ticks();
        let period = now.wrapping_sub(self.last_trigger);

        self.output = self.converter.on_trigger(now, self.last_trigger);
        self.last_trigger = now;

        if self.state == EstimatorState::Stalled {
            info!("HALL: wheel moving again");
            self.state = EstimatorState::Tracking;
        }
        debug!("HALL: period {} ticks -> output {}", period, self.output);
    }

    /// Forces the floor output once the dead period is exceeded.
    fn check_dead_period(&mut self) {
        let now = self.counter.extended_ticks();
        if let Some(floor) = self.watchdog.check_stall(now, self.last_trigger) {
            self.output = floor;
            if self.state != EstimatorState::Stalled {
                warn!(
                    "HALL: dead period of {} ticks is met",
                    self.watchdog.max_wait_ticks()
                );
                self.state = EstimatorState::Stalled;
            }
        }
    }
}

impl<C: FreeRunningCounter, P: ProximityInput> RpmEstimator for HallRpmEstimator<C, P> {
    /// Latches the current sensor level and starts the time base.
    fn setup(&mut self) {
        let near = self.input.is_near();
        self.edge.reset(near);

        self.counter.start();
        self.last_trigger = self.counter.extended_ticks();
        self.output = self.converter.output_range().min;
        self.state = EstimatorState::Tracking;

        info!(
            "HALL: ready, magnet near: {}, dead period {} ticks",
            near,
            self.watchdog.max_wait_ticks()
        );
    }

    fn rpm(&mut self) -> OutputValue {
        let near = self.input.is_near();
        match self.edge.poll(near) {
            Some(Transition::FarToNear) => self.on_trigger(),
            Some(Transition::NearToFar) => trace!("HALL: magnet left"),
            None => {}
        }

        if self.counter.check_overflow() {
            trace!("HALL: counter overflow {}", self.counter.overflows());
        }
        self.check_dead_period();

        self.output
    }
}
