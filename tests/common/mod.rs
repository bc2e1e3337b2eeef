//! Fake hardware shared by the integration tests.
//!
//! Every fake handed to the controller shares its state with a [`Rig`], so tests can steer the
//! sensor and clock and inspect the output after the controller has taken ownership.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use brakectl::config::ControllerConfig;
use brakectl::control::CurrentController;
use brakectl::interface::{CurrentSensor, DutyOutput, MonotonicClock};
use embedded_hal::blocking::delay::DelayUs;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Readings {
    pub shunt_mv: f32,
    pub bus_v: f32,
    pub current_ma: f32,
    pub power_mw: f32,
}

pub struct FakeSensor {
    readings: Rc<Cell<Readings>>,
    reads: Rc<Cell<usize>>,
}

impl FakeSensor {
    fn read(&mut self) -> Readings {
        self.reads.set(self.reads.get() + 1);
        self.readings.get()
    }
}

impl CurrentSensor for FakeSensor {
    fn shunt_voltage_mv(&mut self) -> f32 {
        self.read().shunt_mv
    }

    fn bus_voltage_v(&mut self) -> f32 {
        self.read().bus_v
    }

    fn current_ma(&mut self) -> f32 {
        self.read().current_ma
    }

    fn power_mw(&mut self) -> f32 {
        self.read().power_mw
    }
}

pub struct FakeOutput {
    writes: Rc<RefCell<Vec<u8>>>,
}

impl DutyOutput for FakeOutput {
    fn set_duty(&mut self, duty: u8) {
        self.writes.borrow_mut().push(duty);
    }
}

pub struct FakeClock {
    now: Rc<Cell<u32>>,
    reads: Rc<Cell<usize>>,
}

impl MonotonicClock for FakeClock {
    fn now_micros(&mut self) -> u32 {
        self.reads.set(self.reads.get() + 1);
        self.now.get()
    }
}

/// Busy-wait stand-in: lets the shared clock run forward by the requested time.
///
/// Each wait also records the output writes issued before it started.
pub struct FakeDelay {
    now: Rc<Cell<u32>>,
    waited_us: Rc<Cell<u32>>,
    writes: Rc<RefCell<Vec<u8>>>,
    writes_at_wait: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl DelayUs<u32> for FakeDelay {
    fn delay_us(&mut self, us: u32) {
        let seen = self.writes.borrow().clone();
        self.writes_at_wait.borrow_mut().push(seen);
        self.waited_us.set(self.waited_us.get() + us);
        self.now.set(self.now.get().wrapping_add(us));
    }
}

pub type TestController = CurrentController<FakeSensor, FakeOutput, FakeClock, FakeDelay>;

#[derive(Default)]
pub struct Rig {
    readings: Rc<Cell<Readings>>,
    reads: Rc<Cell<usize>>,
    writes: Rc<RefCell<Vec<u8>>>,
    now: Rc<Cell<u32>>,
    clock_reads: Rc<Cell<usize>>,
    waited_us: Rc<Cell<u32>>,
    writes_at_wait: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rig whose clock starts at `now`.
    pub fn at(now: u32) -> Self {
        let rig = Self::default();
        rig.now.set(now);
        rig
    }

    pub fn controller(&self, config: ControllerConfig) -> TestController {
        CurrentController::new(
            FakeSensor {
                readings: self.readings.clone(),
                reads: self.reads.clone(),
            },
            FakeOutput {
                writes: self.writes.clone(),
            },
            FakeClock {
                now: self.now.clone(),
                reads: self.clock_reads.clone(),
            },
            FakeDelay {
                now: self.now.clone(),
                waited_us: self.waited_us.clone(),
                writes: self.writes.clone(),
                writes_at_wait: self.writes_at_wait.clone(),
            },
            config,
        )
    }

    pub fn set_current(&self, current_ma: f32) {
        let mut r = self.readings.get();
        r.current_ma = current_ma;
        self.readings.set(r);
    }

    pub fn set_readings(&self, readings: Readings) {
        self.readings.set(readings);
    }

    pub fn now(&self) -> u32 {
        self.now.get()
    }

    pub fn set_now(&self, now: u32) {
        self.now.set(now);
    }

    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }

    pub fn writes(&self) -> Vec<u8> {
        self.writes.borrow().clone()
    }

    pub fn last_write(&self) -> Option<u8> {
        self.writes.borrow().last().copied()
    }

    pub fn sensor_reads(&self) -> usize {
        self.reads.get()
    }

    pub fn waited_us(&self) -> u32 {
        self.waited_us.get()
    }

    pub fn clock_reads(&self) -> usize {
        self.clock_reads.get()
    }

    /// Output writes issued before each blocking wait, one entry per wait.
    pub fn writes_at_wait(&self) -> Vec<Vec<u8>> {
        self.writes_at_wait.borrow().clone()
    }
}
