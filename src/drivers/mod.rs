// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-level conversions that sit above the raw `hw/` layer and below the
//! control logic.
//!
//! ## Existing drivers
//!
//! - [`shunt_monitor`] – Shunt amplifier + bus divider current sensing over two ADC channels

pub mod shunt_monitor;

pub use shunt_monitor::{ShuntCalibration, ShuntMonitor};
