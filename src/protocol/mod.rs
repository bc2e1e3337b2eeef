// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Text protocol spoken with the host over the serial link.

pub mod messages;
pub mod parser;
pub mod report;

pub use messages::{Command, ParseError};
pub use parser::Parser;
