use hal::gpio::{Pin, Pull};

use hallspeed_algo::peripherals::ProximityInput;

use super::pinout;

/// Digital Hall sensor. The output is pulled low while a magnet is near.
pub struct HallInput {
    pin: Pin,
}

impl HallInput {
    pub fn new() -> Self {
        let mut pin = pinout::sensor::HALL.init();
        pin.pull(Pull::Up);
        HallInput { pin }
    }
}

impl Default for HallInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ProximityInput for HallInput {
    fn is_near(&mut self) -> bool {
        self.pin.is_low()
    }
}
