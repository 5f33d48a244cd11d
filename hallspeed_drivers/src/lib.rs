#![no_std]

// Licensed under the Apache License, Version 2.0

pub mod hall_input;
pub mod pinout;
pub mod pot_adc;
pub mod tick_timer;
