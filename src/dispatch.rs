// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command dispatch and telemetry pacing for the host link.
//!
//! The dispatcher sits between the serial link and the current controller. It decodes command
//! lines into [`Command`]s, applies them to the controller, and, while the link is running,
//! drives the control loop and decides when a telemetry record is due.
//!
//! `start` and `stop` both de-energize and clear the controller; they differ only in whether the
//! loop keeps running afterwards. The link starts paused.

use embedded_hal::blocking::delay::DelayUs;
use fugit::MicrosDurationU32;

use crate::control::{CurrentController, Telemetry};
use crate::interface::{CurrentSensor, DutyOutput, MonotonicClock};
use crate::protocol::{Command, ParseError, Parser};

/// Whether the host has the loop running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No control updates, no telemetry. Commands are still applied.
    Paused,
    Running,
}

pub struct Dispatcher {
    parser: Parser,
    link: LinkState,
    telemetry_period_us: u32,
    last_report_us: u32,
}

impl Dispatcher {
    pub fn new(telemetry_period: MicrosDurationU32) -> Self {
        Self {
            parser: Parser::new(),
            link: LinkState::Paused,
            telemetry_period_us: telemetry_period.ticks(),
            last_report_us: 0,
        }
    }

    #[inline]
    pub fn link(&self) -> LinkState {
        self.link
    }

    /// Feed one received byte. Once a line completes, the decoded command is applied and returned.
    pub fn handle_byte<S, O, C, D>(
        &mut self,
        byte: u8,
        controller: &mut CurrentController<S, O, C, D>,
    ) -> Option<Result<Command, ParseError>>
    where
        S: CurrentSensor,
        O: DutyOutput,
        C: MonotonicClock,
        D: DelayUs<u32>,
    {
        let result = self.parser.push(byte)?;
        match result {
            Ok(command) => self.apply(command, controller),
            Err(err) => warn!("rejected command: {}", err),
        }
        Some(result)
    }

    /// Apply one decoded command. `Start` and `Stop` block for the brake release time.
    pub fn apply<S, O, C, D>(&mut self, command: Command, controller: &mut CurrentController<S, O, C, D>)
    where
        S: CurrentSensor,
        O: DutyOutput,
        C: MonotonicClock,
        D: DelayUs<u32>,
    {
        match command {
            Command::SetTarget(current_ma) => controller.set_target(current_ma),
            Command::SetGain(which, value) => controller.set_gain(which, value),
            Command::Start => {
                controller.reset();
                self.link = LinkState::Running;
                self.last_report_us = controller.now_micros();
                info!("link running");
            }
            Command::Stop => {
                controller.reset();
                self.link = LinkState::Paused;
                info!("link paused");
            }
        }
    }

    /// Periodic work of the main loop: one control update and, when due, a telemetry record.
    ///
    /// While paused only the clock is read, so the cycle counter never wraps unseen.
    pub fn poll<S, O, C, D>(&mut self, controller: &mut CurrentController<S, O, C, D>) -> Option<Telemetry>
    where
        S: CurrentSensor,
        O: DutyOutput,
        C: MonotonicClock,
        D: DelayUs<u32>,
    {
        if self.link == LinkState::Paused {
            controller.now_micros();
            return None;
        }

        controller.update();

        let now = controller.now_micros();
        if now.wrapping_sub(self.last_report_us) > self.telemetry_period_us {
            self.last_report_us = now;
            return Some(controller.telemetry());
        }
        None
    }
}
