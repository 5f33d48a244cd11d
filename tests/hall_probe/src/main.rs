#![no_main]
#![no_std]

// Bench check of the Hall sensor wiring and calibration: turn the wheel by hand
// and watch sensor level, tick count and output over RTT.

use cortex_m_rt::entry;
use hal::{clocks::Clocks, pac};
use panic_halt as _;

use rtt_target::{rprintln, rtt_init_print};

use hallspeed_algo::{settings, HallRpmEstimator, RpmEstimator};
use hallspeed_drivers::{
    hall_input::HallInput,
    tick_timer::{TickTimer, TICK_RATE_HZ},
};

/// Polls between two reports
const REPORT_EVERY: u32 = 200_000;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("Starting Hall probe");

    let dp = pac::Peripherals::take().unwrap();

    let clock_cfg = Clocks::default();
    clock_cfg.setup().unwrap();
    rprintln!("System clock frequency: {} Hz", clock_cfg.sysclk());

    let tick_timer = TickTimer::new(dp.TIM3, &clock_cfg);
    rprintln!(
        "Tick rate: {} Hz (calibrated for {} Hz)",
        tick_timer.tick_rate_hz(),
        TICK_RATE_HZ
    );

    let config = settings::hall_config(TICK_RATE_HZ);
    rprintln!("Dead period: {} ticks", config.max_wait_ticks());

    let mut estimator = HallRpmEstimator::new(config, tick_timer, HallInput::new());
    estimator.setup();

    let mut polls: u32 = 0;
    loop {
        let rpm = estimator.rpm();
        polls = polls.wrapping_add(1);

        if polls % REPORT_EVERY == 0 {
            rprintln!(
                "near:{} ticks:{} last:{} state:{:?} out:{}",
                estimator.magnet_near(),
                estimator.ticks(),
                estimator.last_trigger(),
                estimator.state(),
                rpm
            );
        }
    }
}
