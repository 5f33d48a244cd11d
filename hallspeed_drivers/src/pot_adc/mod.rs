use hal::{
    adc::{Adc, AdcDevice, InputType, SampleTime},
    pac::ADC1,
};

use hallspeed_algo::peripherals::AnalogInput;

use super::pinout;

/// Potentiometer read with blocking single conversions on ADC1.
pub struct PotAdc {
    adc: Adc<ADC1>,
    channel: u8,
}

impl PotAdc {
    /// # Arguments
    /// * `adc1` - ADC1 register block
    /// * `systick_freq` - Clock used by the ADC driver for its settling delays
    pub fn new(adc1: ADC1, systick_freq: u32) -> Self {
        pinout::sensor::POT.init();
        let channel = pinout::sensor::POT_CHANNEL;

        let mut adc = Adc::new_adc1(adc1, AdcDevice::One, Default::default(), systick_freq);
        adc.set_input_type(channel, InputType::SingleEnded);
        adc.set_sample_time(channel, SampleTime::T2);

        PotAdc { adc, channel }
    }
}

impl AnalogInput for PotAdc {
    fn read(&mut self) -> u16 {
        self.adc.read(self.channel)
    }
}
