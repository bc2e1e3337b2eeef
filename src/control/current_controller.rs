// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Closed-loop current controller for the particle brake.
//!
//! This controller owns the current sensor, the PWM output, a monotonic clock and a blocking
//! delay, and provides a periodic `update()` that computes a duty cycle using PID control and
//! applies it to the brake coil.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! controller.set_target(120.0);
//!
//! loop {
//!     controller.update();
//!     // handle host commands, report telemetry...
//! }
//! ```
//!
//! `update()` never blocks. It evaluates the PID law at most once per `min_sample_interval`, and
//! skips one sample whenever the microsecond clock wraps. `reset()` is the only blocking call: it
//! de-energizes the coil and waits for the brake to release before clearing state.

use embedded_hal::blocking::delay::DelayUs;

use crate::config::ControllerConfig;
use crate::control::{Gain, Gains, Pid, SensorSnapshot, Telemetry};
use crate::interface::{CurrentSensor, DutyOutput, MonotonicClock};
use fugit::MicrosDurationU32;

/// Largest duty cycle the brake output accepts.
pub const DUTY_MAX: u8 = u8::MAX;

/// Operating mode of the current controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrakeMode {
    /// Output held where the last reset left it (off). `update()` does nothing.
    Disabled,

    /// Regulating toward the setpoint.
    Enabled,
}

/// PID current controller and its runtime state.
pub struct CurrentController<S, O, C, D> {
    sensor: S,
    output: O,
    clock: C,
    delay: D,

    config: ControllerConfig,
    pid: Pid,
    mode: BrakeMode,

    /// Target current (mA)
    setpoint_ma: f32,
    /// Clock reading at the last PID evaluation (µs)
    last_sample_us: u32,
    /// Last commanded duty cycle
    duty: u8,

    snapshot: SensorSnapshot,
}

impl<S, O, C, D> CurrentController<S, O, C, D>
where
    S: CurrentSensor,
    O: DutyOutput,
    C: MonotonicClock,
    D: DelayUs<u32>,
{
    /// Create a disabled controller and drive the output to zero.
    pub fn new(sensor: S, mut output: O, mut clock: C, delay: D, config: ControllerConfig) -> Self {
        output.set_duty(0);
        let now = clock.now_micros();

        let pid = Pid::new(config.gains)
            .with_output_limits(0.0, DUTY_MAX as f32)
            .with_anti_windup(config.anti_windup);

        Self {
            sensor,
            output,
            clock,
            delay,
            config,
            pid,
            mode: BrakeMode::Disabled,
            setpoint_ma: 0.0,
            last_sample_us: now,
            duty: 0,
            snapshot: SensorSnapshot::default(),
        }
    }

    /// Set a new target current (mA) and enable regulation.
    ///
    /// Nothing is actuated here; the next qualifying `update()` acts on it.
    pub fn set_target(&mut self, current_ma: f32) {
        if self.mode == BrakeMode::Disabled {
            info!("brake enabled, target {} mA", current_ma);
        } else {
            debug!("brake target {} mA", current_ma);
        }
        self.mode = BrakeMode::Enabled;
        self.setpoint_ma = current_ma;
    }

    /// Replace one PID gain.
    pub fn set_gain(&mut self, which: Gain, value: f32) {
        info!("gain {} = {}", which, value);
        self.pid.set_gain(which, value);
    }

    /// Run one control step.
    pub fn update(&mut self) {
        if self.mode == BrakeMode::Disabled {
            return;
        }

        let now = self.clock.now_micros();
        if now < self.last_sample_us {
            debug!("clock rollover, skipping sample");
            self.last_sample_us = now;
            return;
        }

        let elapsed_us = now - self.last_sample_us;
        if elapsed_us < self.config.min_sample_interval.ticks() {
            return;
        }

        let dt = elapsed_us as f32 / 1_000_000.0;
        let error = self.setpoint_ma - self.current_ma();
        let raw = self.pid.update(error, dt) as i32;

        self.last_sample_us = now;
        self.drive(raw);
    }

    /// De-energize the brake, wait for it to release, then clear all state.
    ///
    /// Blocks the caller for `unforced_settle`.
    pub fn reset(&mut self) {
        info!("brake reset");
        self.drive(0);
        self.delay.delay_us(self.config.unforced_settle.ticks());
        self.clear();
    }

    /// Saturate a raw command to the duty range and apply it.
    fn drive(&mut self, raw: i32) {
        self.duty = raw.clamp(0, DUTY_MAX as i32) as u8;
        self.output.set_duty(self.duty);
    }

    fn clear(&mut self) {
        self.snapshot = SensorSnapshot::default();
        self.duty = 0;

        self.mode = BrakeMode::Disabled;
        self.setpoint_ma = 0.0;
        self.pid.reset();
        self.last_sample_us = self.clock.now_micros();
    }

    /// Refresh and return the shunt voltage (mV).
    pub fn shunt_voltage_mv(&mut self) -> f32 {
        self.snapshot.shunt_mv = self.sensor.shunt_voltage_mv();
        self.snapshot.shunt_mv
    }

    /// Refresh and return the bus voltage (V).
    pub fn bus_voltage_v(&mut self) -> f32 {
        self.snapshot.bus_v = self.sensor.bus_voltage_v();
        self.snapshot.bus_v
    }

    /// Refresh and return the brake current (mA).
    pub fn current_ma(&mut self) -> f32 {
        self.snapshot.current_ma = self.sensor.current_ma();
        self.snapshot.current_ma
    }

    /// Refresh and return the power (mW).
    pub fn power_mw(&mut self) -> f32 {
        self.snapshot.power_mw = self.sensor.power_mw();
        self.snapshot.power_mw
    }

    /// Load voltage (V) derived from the last shunt and bus readings. Does not touch the sensor.
    pub fn load_voltage_v(&mut self) -> f32 {
        self.snapshot.load_v = self.snapshot.derived_load_v();
        self.snapshot.load_v
    }

    /// Refresh every sensor field and return a full telemetry record.
    pub fn telemetry(&mut self) -> Telemetry {
        self.shunt_voltage_mv();
        self.bus_voltage_v();
        self.current_ma();
        self.power_mw();
        self.load_voltage_v();

        Telemetry {
            sensor: self.snapshot,
            duty: self.duty,
            setpoint_ma: self.setpoint_ma,
        }
    }

    /// Current time on the controller's clock (µs).
    #[inline]
    pub fn now_micros(&mut self) -> u32 {
        self.clock.now_micros()
    }
}

impl<S, O, C, D> CurrentController<S, O, C, D> {
    /// Duty cycle currently driven on the output.
    #[inline]
    pub fn duty_cycle(&self) -> u8 {
        self.duty
    }

    /// Target current (mA).
    #[inline]
    pub fn setpoint_ma(&self) -> f32 {
        self.setpoint_ma
    }

    #[inline]
    pub fn mode(&self) -> BrakeMode {
        self.mode
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.mode == BrakeMode::Enabled
    }

    #[inline]
    pub fn gains(&self) -> Gains {
        self.pid.gains()
    }

    /// PID memory, for inspection.
    #[inline]
    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    /// Clock reading at the last PID evaluation (µs).
    #[inline]
    pub fn last_sample_us(&self) -> u32 {
        self.last_sample_us
    }

    /// Last sensor values, without reading the sensor.
    #[inline]
    pub fn snapshot(&self) -> SensorSnapshot {
        self.snapshot
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Time the brake needs to engage once energized.
    #[inline]
    pub fn engage_latency(&self) -> MicrosDurationU32 {
        self.config.forced_settle
    }

    /// Time the brake needs to release once de-energized.
    #[inline]
    pub fn release_latency(&self) -> MicrosDurationU32 {
        self.config.unforced_settle
    }
}
