// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sensor snapshot and telemetry records produced by the current controller.

/// Last values read from the current sensor.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    /// Shunt voltage (mV)
    pub shunt_mv: f32,
    /// Bus voltage (V)
    pub bus_v: f32,
    /// Brake current (mA)
    pub current_ma: f32,
    /// Power (mW)
    pub power_mw: f32,
    /// Load-side voltage (V), derived from bus and shunt
    pub load_v: f32,
}

impl SensorSnapshot {
    /// Load voltage implied by the stored bus and shunt readings.
    #[inline]
    pub fn derived_load_v(&self) -> f32 {
        self.bus_v + self.shunt_mv / 1000.0
    }
}

/// One telemetry record as reported to the host.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telemetry {
    pub sensor: SensorSnapshot,
    /// Duty cycle currently driven on the brake output
    pub duty: u8,
    /// Target current (mA)
    pub setpoint_ma: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_voltage_adds_shunt_drop() {
        let snapshot = SensorSnapshot {
            shunt_mv: 250.0,
            bus_v: 12.0,
            ..Default::default()
        };
        assert_eq!(snapshot.derived_load_v(), 12.25);
    }
}
