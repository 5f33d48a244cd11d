#![no_main]
#![no_std]

use defmt_rtt as _;
use panic_probe as _;

use hal::{self, clocks::Clocks, pac};

use hallspeed_algo::{settings, OutputValue, RpmEstimator};

#[cfg(feature = "estimator-hall")]
use hallspeed_algo::{HallConfig, HallRpmEstimator};
#[cfg(feature = "estimator-linear")]
use hallspeed_algo::LinearRpmEstimator;
#[cfg(feature = "estimator-pot")]
use hallspeed_algo::PotRpmEstimator;

#[cfg(feature = "estimator-hall")]
use hallspeed_drivers::{
    hall_input::HallInput,
    tick_timer::{self, TickTimer, TICK_RATE_HZ},
};
#[cfg(feature = "estimator-pot")]
use hallspeed_drivers::pot_adc::PotAdc;

#[cfg(not(any(
    feature = "estimator-hall",
    feature = "estimator-linear",
    feature = "estimator-pot"
)))]
compile_error!("Select an estimator: estimator-hall, estimator-linear or estimator-pot");

#[cfg(any(
    all(feature = "estimator-hall", feature = "estimator-linear"),
    all(feature = "estimator-hall", feature = "estimator-pot"),
    all(feature = "estimator-linear", feature = "estimator-pot"),
))]
compile_error!("Only one estimator feature may be enabled");

// Calibration is checked while compiling
#[cfg(feature = "estimator-hall")]
const HALL_CONFIG: HallConfig = settings::hall_config(TICK_RATE_HZ);
#[cfg(feature = "estimator-hall")]
const _: () = assert!(tick_timer::COUNTER_BITS == settings::COUNTER_BITS);

#[cfg(feature = "estimator-hall")]
type Estimator = HallRpmEstimator<TickTimer, HallInput>;
#[cfg(feature = "estimator-linear")]
type Estimator = LinearRpmEstimator;
#[cfg(feature = "estimator-pot")]
type Estimator = PotRpmEstimator<PotAdc>;

/// Busy wait between two sweep steps, the sweep has no time base of its own
#[cfg(feature = "estimator-linear")]
const SWEEP_STEP_CYCLES: u32 = 2_000_000;

#[cfg(feature = "estimator-hall")]
fn make_estimator(dp: pac::Peripherals, clock_cfg: &Clocks) -> Estimator {
    let tick_timer = TickTimer::new(dp.TIM3, clock_cfg);
    defmt::assert_eq!(
        tick_timer.tick_rate_hz(),
        TICK_RATE_HZ,
        "TIM3 clock does not divide down to the calibrated tick rate"
    );
    HallRpmEstimator::new(HALL_CONFIG, tick_timer, HallInput::new())
}

#[cfg(feature = "estimator-linear")]
fn make_estimator(_dp: pac::Peripherals, _clock_cfg: &Clocks) -> Estimator {
    LinearRpmEstimator::new(settings::OUTPUT_RANGE)
}

#[cfg(feature = "estimator-pot")]
fn make_estimator(dp: pac::Peripherals, clock_cfg: &Clocks) -> Estimator {
    PotRpmEstimator::new(settings::POT_CONFIG, PotAdc::new(dp.ADC1, clock_cfg.systick()))
}

#[rtic::app(device = pac, peripherals = true)]
mod app {
    use super::*;

    use hal::gpio::Pin;
    use hallspeed_drivers::pinout;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        estimator: Estimator,
        led: Pin,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        let dp = ctx.device;
        let clock_cfg = Clocks::default();
        clock_cfg.setup().unwrap();

        let sysclk_freq = clock_cfg.sysclk(); // System clock frequency in Hz
        defmt::debug!("SYSTEM: Clock frequency is {} MHz", sysclk_freq / 1000000);

        let mut led = pinout::led::STATUS.init();
        led.set_high(); // Off

        let mut estimator = make_estimator(dp, &clock_cfg);
        estimator.setup();
        defmt::info!(
            "SYSTEM: estimator ready, output range {}..={}",
            settings::OUTPUT_RANGE.min,
            settings::OUTPUT_RANGE.max
        );

        (Shared {}, Local { estimator, led })
    }

    // Polling loop: the Hall estimator needs to run far more often than TIM3 wraps
    #[idle(local = [estimator, led])]
    fn idle(cx: idle::Context) -> ! {
        let mut last: OutputValue = settings::OUTPUT_RANGE.min;
        loop {
            let rpm = cx.local.estimator.rpm();

            if rpm != last {
                defmt::debug!("OUTPUT: {}", rpm);
                // LED lit while the output is above its floor
                if rpm > settings::OUTPUT_RANGE.min {
                    cx.local.led.set_low();
                } else {
                    cx.local.led.set_high();
                }
                last = rpm;
            }

            #[cfg(feature = "estimator-linear")]
            cortex_m::asm::delay(SWEEP_STEP_CYCLES);
        }
    }
}

#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
