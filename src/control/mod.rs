// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! This module provides the closed-loop current regulation for the particle brake.
//!
//! ## Modules
//!
//! - [`pid`] - PID law with selectable anti-windup.
//! - [`current_controller`] - Rate-limited current loop driving the brake PWM output.
//! - [`telemetry`] - Sensor snapshot and telemetry records.

pub mod current_controller;
pub mod pid;
pub mod telemetry;

pub use current_controller::{BrakeMode, CurrentController, DUTY_MAX};
pub use pid::{AntiWindup, Gain, Gains, Pid};
pub use telemetry::{SensorSnapshot, Telemetry};
