// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command vocabulary of the host link.

use core::fmt;

use crate::control::Gain;

/// Line terminator for commands.
pub const END_BYTE: u8 = b'\n';

/// Longest command line accepted, terminator excluded.
pub const MAX_LINE_LEN: usize = 32;

// Command prefixes
pub const CMD_TARGET: u8 = b'b';
pub const CMD_GAIN: u8 = b'k';
pub const CMD_START: &str = "start";
pub const CMD_STOP: &str = "stop";

// Report tags
pub const REPORT_HELLO: &str = "hello";
pub const REPORT_READY: &str = "ready";
pub const REPORT_BRAKE: &str = "brake";
pub const REPORT_ERROR: &str = "error";

/// Decoded host command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `b<mA>`
    SetTarget(f32),
    /// `kp<value>`, `ki<value>`, `kd<value>`
    SetGain(Gain, f32),
    /// Start streaming; de-energizes and clears the controller first.
    Start,
    /// Stop streaming; de-energizes and clears the controller.
    Stop,
}

/// Why a command line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    UnknownCommand,
    UnknownGain,
    InvalidNumber,
    Overflow,
}

impl ParseError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseError::UnknownCommand => "unknown command",
            ParseError::UnknownGain => "unknown gain",
            ParseError::InvalidNumber => "invalid number",
            ParseError::Overflow => "line too long",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
