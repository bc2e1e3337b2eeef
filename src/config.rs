// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board constants and controller tuning configuration.

use fugit::{HertzU32, MicrosDurationU32};

use crate::control::{AntiWindup, Gains};
use crate::drivers::ShuntCalibration;

/// Name announced to the host in the `hello` report.
pub const DEVICE_NAME: &str = "brake_controller";

/// Host link baud rate (USART1).
pub const HOST_BAUD: u32 = 115_200;

/// Brake coil PWM carrier frequency.
pub const PWM_FREQUENCY: HertzU32 = HertzU32::kHz(20);

/// Telemetry is reported once this much time has passed since the previous report.
pub const TELEMETRY_PERIOD: MicrosDurationU32 = MicrosDurationU32::millis(100);

/// Gains loaded at boot, before the host sends any tuning.
pub const BOOT_GAINS: Gains = Gains {
    kp: 30.0,
    ki: 0.0,
    kd: 0.0,
};

/// ADC1 channel wired to the shunt amplifier output (PC4, ADC1_IN14).
pub const SHUNT_ADC_CHANNEL: u8 = 14;

/// ADC1 channel wired to the bus voltage divider (PC5, ADC1_IN15).
pub const BUS_ADC_CHANNEL: u8 = 15;

/// Current-sense front end on the brake board: 0.1 Ω shunt, x50 amplifier, 1:11 bus divider.
pub const SHUNT_CALIBRATION: ShuntCalibration = ShuntCalibration {
    vref_mv: 3300.0,
    adc_full_scale: 4095,
    amplifier_gain: 50.0,
    shunt_ohms: 0.1,
    bus_divider: 11.0,
};

/// Tuning and timing configuration of the current controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    /// PID gains at construction. Mutable afterwards through `set_gain`.
    pub gains: Gains,

    /// Shortest time between two PID evaluations.
    pub min_sample_interval: MicrosDurationU32,

    /// Time the brake needs to mechanically release once de-energized. `reset` blocks this long.
    pub unforced_settle: MicrosDurationU32,

    /// Time the brake needs to engage once energized.
    pub forced_settle: MicrosDurationU32,

    /// Integral windup handling.
    pub anti_windup: AntiWindup,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            gains: Gains {
                kp: 1.0,
                ki: 0.0,
                kd: 0.0,
            },
            min_sample_interval: MicrosDurationU32::micros(500),
            unforced_settle: MicrosDurationU32::millis(25),
            forced_settle: MicrosDurationU32::millis(14),
            anti_windup: AntiWindup::None,
        }
    }
}

impl ControllerConfig {
    /// Set the initial gains.
    pub fn with_gains(mut self, gains: Gains) -> Self {
        self.gains = gains;
        self
    }

    /// Set the minimum sampling interval.
    pub fn with_min_sample_interval(mut self, interval: MicrosDurationU32) -> Self {
        self.min_sample_interval = interval;
        self
    }

    /// Set the release and engage latencies of the brake.
    pub fn with_settle_times(
        mut self,
        unforced: MicrosDurationU32,
        forced: MicrosDurationU32,
    ) -> Self {
        self.unforced_settle = unforced;
        self.forced_settle = forced;
        self
    }

    /// Select an anti-windup strategy.
    pub fn with_anti_windup(mut self, anti_windup: AntiWindup) -> Self {
        self.anti_windup = anti_windup;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_brake_datasheet_timings() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.min_sample_interval.ticks(), 500);
        assert_eq!(cfg.unforced_settle.to_millis(), 25);
        assert_eq!(cfg.forced_settle.to_millis(), 14);
        assert_eq!(cfg.anti_windup, AntiWindup::None);
        assert_eq!(cfg.gains.kp, 1.0);
    }

    #[test]
    fn builder_overrides_fields() {
        let cfg = ControllerConfig::default()
            .with_gains(BOOT_GAINS)
            .with_min_sample_interval(MicrosDurationU32::micros(1_000))
            .with_anti_windup(AntiWindup::Conditional);

        assert_eq!(cfg.gains.kp, 30.0);
        assert_eq!(cfg.min_sample_interval.ticks(), 1_000);
        assert_eq!(cfg.anti_windup, AntiWindup::Conditional);
    }

    #[test]
    fn telemetry_period_is_100_ms() {
        assert_eq!(TELEMETRY_PERIOD.ticks(), 100_000);
    }
}
