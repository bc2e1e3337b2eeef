// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Particle Brake Controller Firmware
//!
//! This crate contains the firmware for the particle brake current controller, written in Rust,
//! targeting an STM32F767 MCU. It regulates the current through the brake coil with a PID loop,
//! reports telemetry over a serial host link and accepts tuning commands from the host.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`control`] | PID current controller (the regulation loop and its safety reset) |
//! | [`interface`] | Traits the controller consumes (sensor, duty output, clock) |
//! | [`config`] | Board constants and controller tuning configuration |
//! | [`drivers`] | Device-level conversions (shunt amplifier readings) |
//! | [`hw`] | MCU-level wrappers around USART, ADC, PWM, DWT, etc. |
//! | [`protocol`] | Host command parsing and report formatting |
//! | [`dispatch`] | Routes host commands into the controller, paces telemetry |
//!
//! ## Getting Started
//!
//! Run the host-side tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod dispatch;
pub mod drivers;
pub mod hw;
pub mod interface;
pub mod protocol;
