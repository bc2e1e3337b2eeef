// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Report lines sent to the host.
//!
//! Every report is `<tag>:<fields>` followed by CRLF. Floats carry three decimals.

use core::fmt::{self, Write};

use crate::control::{Gains, Telemetry};
use crate::protocol::messages::*;

/// `hello:<device>` - first line after boot.
pub fn write_hello<W: Write>(w: &mut W, device: &str) -> fmt::Result {
    write!(w, "{}:{}\r\n", REPORT_HELLO, device)
}

/// `ready:<kp>,<ki>,<kd>` - init data, sent once the controller is built.
pub fn write_ready<W: Write>(w: &mut W, gains: &Gains) -> fmt::Result {
    write!(
        w,
        "{}:{:.3},{:.3},{:.3}\r\n",
        REPORT_READY, gains.kp, gains.ki, gains.kd
    )
}

/// `brake:<shunt_mv>,<bus_v>,<current_ma>,<power_mw>,<load_v>,<duty>,<setpoint_ma>`
pub fn write_telemetry<W: Write>(w: &mut W, t: &Telemetry) -> fmt::Result {
    let s = &t.sensor;
    write!(
        w,
        "{}:{:.3},{:.3},{:.3},{:.3},{:.3},{},{:.3}\r\n",
        REPORT_BRAKE, s.shunt_mv, s.bus_v, s.current_ma, s.power_mw, s.load_v, t.duty, t.setpoint_ma
    )
}

/// `error:<reason>` - a rejected command line.
pub fn write_error<W: Write>(w: &mut W, err: ParseError) -> fmt::Result {
    write!(w, "{}:{}\r\n", REPORT_ERROR, err)
}
