// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hardware-facing traits consumed by the current controller.
//!
//! The controller owns one implementation of each. All of them are infallible: a failed sensor
//! conversion is expected to surface as a stale or zero value, never as an error.

/// Current-sense readings for the branch that carries the brake current.
pub trait CurrentSensor {
    /// Voltage across the sense resistor, in millivolts.
    fn shunt_voltage_mv(&mut self) -> f32;

    /// Supply-side bus voltage, in volts.
    fn bus_voltage_v(&mut self) -> f32;

    /// Brake current, in milliamps.
    fn current_ma(&mut self) -> f32;

    /// Power delivered to the load, in milliwatts.
    fn power_mw(&mut self) -> f32;
}

/// PWM-capable output driving the brake coil.
pub trait DutyOutput {
    /// Drive the output with an 8-bit duty cycle (0 = off, 255 = fully on).
    fn set_duty(&mut self, duty: u8);
}

/// Free-running microsecond counter. Wraps at `u32::MAX`.
pub trait MonotonicClock {
    fn now_micros(&mut self) -> u32;
}

impl<T: CurrentSensor + ?Sized> CurrentSensor for &mut T {
    fn shunt_voltage_mv(&mut self) -> f32 {
        (**self).shunt_voltage_mv()
    }

    fn bus_voltage_v(&mut self) -> f32 {
        (**self).bus_voltage_v()
    }

    fn current_ma(&mut self) -> f32 {
        (**self).current_ma()
    }

    fn power_mw(&mut self) -> f32 {
        (**self).power_mw()
    }
}

impl<T: DutyOutput + ?Sized> DutyOutput for &mut T {
    fn set_duty(&mut self, duty: u8) {
        (**self).set_duty(duty)
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &mut T {
    fn now_micros(&mut self) -> u32 {
        (**self).now_micros()
    }
}
