use super::PinDef;
use super::{PinMode, Port};

/// Hall sensor output, open drain and active low
pub const HALL: PinDef = PinDef::new(Port::A, 8, PinMode::Input);

/// Potentiometer wiper (ADC1_IN1)
pub const POT: PinDef = PinDef::new(Port::A, 0, PinMode::Analog);

/// ADC1 channel wired to `POT`
pub const POT_CHANNEL: u8 = 1;
