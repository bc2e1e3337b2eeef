// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Current-sense front end built from a shunt amplifier and a bus voltage divider.
//!
//! Both signals are sampled by 12-bit ADC channels. Each accessor performs a fresh conversion;
//! nothing is cached here.
//!
//! Signal chain:
//! - Shunt: `I * R_shunt` amplified by `amplifier_gain` into the ADC
//! - Bus: supply voltage divided by `bus_divider` into the ADC

use crate::interface::CurrentSensor;

/// Analog front-end parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShuntCalibration {
    /// ADC reference voltage (mV)
    pub vref_mv: f32,
    /// Raw reading at `vref_mv`
    pub adc_full_scale: u16,
    /// Shunt amplifier gain (V/V)
    pub amplifier_gain: f32,
    /// Shunt resistance (Ω)
    pub shunt_ohms: f32,
    /// Bus divider ratio (input / ADC pin)
    pub bus_divider: f32,
}

impl ShuntCalibration {
    /// Millivolts at the ADC pin for a raw reading.
    #[inline]
    fn pin_mv(&self, raw: u16) -> f32 {
        (raw as f32) * self.vref_mv / (self.adc_full_scale as f32)
    }
}

/// Sensor built on two raw ADC readers.
///
/// `ReadShunt` and `ReadBus` are closures that return raw 12-bit ADC readings (0..4095).
pub struct ShuntMonitor<ReadShunt, ReadBus> {
    read_shunt: ReadShunt,
    read_bus: ReadBus,
    cal: ShuntCalibration,
}

impl<ReadShunt, ReadBus> ShuntMonitor<ReadShunt, ReadBus>
where
    ReadShunt: FnMut() -> u16,
    ReadBus: FnMut() -> u16,
{
    pub fn new(read_shunt: ReadShunt, read_bus: ReadBus, cal: ShuntCalibration) -> Self {
        Self {
            read_shunt,
            read_bus,
            cal,
        }
    }

    fn shunt_mv(&mut self) -> f32 {
        let raw = (self.read_shunt)();
        self.cal.pin_mv(raw) / self.cal.amplifier_gain
    }

    fn bus_v(&mut self) -> f32 {
        let raw = (self.read_bus)();
        self.cal.pin_mv(raw) * self.cal.bus_divider / 1000.0
    }
}

impl<ReadShunt, ReadBus> CurrentSensor for ShuntMonitor<ReadShunt, ReadBus>
where
    ReadShunt: FnMut() -> u16,
    ReadBus: FnMut() -> u16,
{
    fn shunt_voltage_mv(&mut self) -> f32 {
        self.shunt_mv()
    }

    fn bus_voltage_v(&mut self) -> f32 {
        self.bus_v()
    }

    fn current_ma(&mut self) -> f32 {
        // mV / Ω = mA
        self.shunt_mv() / self.cal.shunt_ohms
    }

    fn power_mw(&mut self) -> f32 {
        // V * mA = mW
        let current_ma = self.current_ma();
        self.bus_v() * current_ma
    }
}
