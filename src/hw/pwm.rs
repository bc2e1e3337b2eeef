// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 8-bit duty output on top of a HAL PWM channel.
//!
//! The controller speaks in 0..=255 duty steps; the timer channel has its own resolution
//! (`get_max_duty()`), so every write is rescaled.

use embedded_hal::PwmPin;

use crate::interface::DutyOutput;

/// PWM channel driving the brake coil.
pub struct PwmDuty<P> {
    pin: P,
    duty: u8,
}

impl<P> PwmDuty<P>
where
    P: PwmPin<Duty = u16>,
{
    /// Enable the channel at 0% duty.
    pub fn new(mut pin: P) -> Self {
        pin.set_duty(0);
        pin.enable();
        Self { pin, duty: 0 }
    }

    /// Last 8-bit duty written.
    #[inline]
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Timer compare value for an 8-bit duty.
    fn scale(&self, duty: u8) -> u16 {
        let max = self.pin.get_max_duty() as u32;
        ((duty as u32 * max) / u8::MAX as u32) as u16
    }

    pub fn free(self) -> P {
        self.pin
    }
}

impl<P> DutyOutput for PwmDuty<P>
where
    P: PwmPin<Duty = u16>,
{
    fn set_duty(&mut self, duty: u8) {
        let compare = self.scale(duty);
        self.pin.set_duty(compare);
        self.duty = duty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeChannel {
        duty: u16,
        max: u16,
        enabled: bool,
    }

    impl PwmPin for FakeChannel {
        type Duty = u16;

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn get_duty(&self) -> u16 {
            self.duty
        }

        fn get_max_duty(&self) -> u16 {
            self.max
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    fn channel(max: u16) -> FakeChannel {
        FakeChannel {
            duty: 1234,
            max,
            enabled: false,
        }
    }

    #[test]
    fn starts_enabled_at_zero() {
        let pwm = PwmDuty::new(channel(5399));
        let ch = pwm.free();
        assert!(ch.enabled);
        assert_eq!(ch.duty, 0);
    }

    #[test]
    fn full_scale_maps_to_max_duty() {
        let mut pwm = PwmDuty::new(channel(5399));
        pwm.set_duty(255);
        assert_eq!(pwm.duty(), 255);
        assert_eq!(pwm.free().get_duty(), 5399);
    }

    #[test]
    fn intermediate_duty_is_scaled() {
        let mut pwm = PwmDuty::new(channel(1020));
        pwm.set_duty(150);
        assert_eq!(pwm.free().get_duty(), 600);
    }
}
