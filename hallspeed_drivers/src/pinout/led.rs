use super::PinDef;
use super::{PinMode, Port};

/// Status LED, active low
pub const STATUS: PinDef = PinDef::new(Port::B, 15, PinMode::Output);
