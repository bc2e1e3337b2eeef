// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # MCU-Level Wrappers
//!
//! `clock`, `pwm` and `led` only depend on `cortex-m` and the `embedded-hal` traits, so they build
//! (and are tested) on the host. The register-level wrappers need the HAL and are only compiled
//! with the `firmware` feature.

pub mod clock;
pub mod led;
pub mod pwm;

#[cfg(feature = "firmware")]
pub mod adc;
#[cfg(feature = "firmware")]
pub mod pins;
#[cfg(feature = "firmware")]
pub mod usart;

pub use clock::CycleClock;
pub use led::Led;
pub use pwm::PwmDuty;

#[cfg(feature = "firmware")]
pub use adc::Adc;
#[cfg(feature = "firmware")]
pub use pins::BoardPins;
#[cfg(feature = "firmware")]
pub use usart::Usart;
