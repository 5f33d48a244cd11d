// TIM3 as the free-running time base of the Hall estimator.
//
// The timer counts up from 0 to 0xFFFF at TICK_RATE_HZ and wraps. The update
// interrupt stays disabled: its flag (UIF) is polled as the overflow indicator.

use hal::{
    clocks::Clocks,
    pac::TIM3,
    timer::{
        Alignment, CaptureCompareDma, CountDir, Timer, TimerConfig, TimerInterrupt, UpdateReqSrc,
    },
};

use hallspeed_algo::peripherals::FreeRunningCounter;

/// Counter frequency, the estimator calibration is built from this value.
pub const TICK_RATE_HZ: u32 = 15_625;

/// TIM3 is a 16-bit timer
pub const COUNTER_BITS: u8 = 16;

pub struct TickTimer {
    tim: Timer<TIM3>,
    tick_rate_hz: u32, // Rate actually reached with the integer prescaler
}

impl TickTimer {
    pub fn new(tim3: TIM3, clock_cfg: &Clocks) -> Self {
        let mut timer = Timer::new_tim3(
            tim3,
            1.,
            TimerConfig {
                one_pulse_mode: false,
                update_request_source: UpdateReqSrc::Any,
                auto_reload_preload: false,
                alignment: Alignment::Edge,
                capture_compare_dma: CaptureCompareDma::Update,
                direction: CountDir::Up,
            },
            clock_cfg,
        );

        // Override the frequency derived prescaler: full 16-bit range at a fixed tick rate
        let timer_clock = clock_cfg.apb1_timer();
        let psc = timer_clock / TICK_RATE_HZ - 1;
        timer.set_prescaler(psc as u16);
        timer.set_auto_reload(0xFFFF);

        TickTimer {
            tim: timer,
            tick_rate_hz: timer_clock / (psc + 1),
        }
    }

    /// Tick rate after prescaler rounding; must equal `TICK_RATE_HZ`.
    pub fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }
}

impl FreeRunningCounter for TickTimer {
    fn start(&mut self) {
        self.tim.disable();
        // Update event loads the prescaler and zeroes the counter
        self.tim.regs.egr.write(|w| w.ug().set_bit());
        self.tim.clear_interrupt(TimerInterrupt::Update);
        self.tim.enable();
    }

    fn count(&self) -> u16 {
        self.tim.read_count() as u16
    }

    fn overflow_pending(&self) -> bool {
        self.tim.regs.sr.read().uif().bit_is_set()
    }

    fn clear_overflow(&mut self) {
        self.tim.clear_interrupt(TimerInterrupt::Update);
    }
}
