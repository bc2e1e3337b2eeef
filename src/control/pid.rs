// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! PID law for the brake current loop.
//!
//! Works in `no_std` and does not allocate memory. The derivative acts on the error and the
//! integral accumulates `error * dt`; the returned value is the raw, unclamped command; saturating
//! it to the actuator range is left to the caller.

/// Which of the three gains a tuning command addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    P,
    I,
    D,
}

/// Proportional, integral and derivative gains.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

/// How the integrator behaves while the output is saturated.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AntiWindup {
    /// Accumulate unconditionally. The integral is unbounded.
    None,

    /// Clamp the accumulated `error * dt` sum to `[min, max]`.
    Limit { min: f32, max: f32 },

    /// Skip accumulation when the output is saturated and the error pushes it further out.
    Conditional,
}

/// PID controller with tunable gains and selectable anti-windup.
#[derive(Clone, Debug)]
pub struct Pid {
    gains: Gains,

    /// Integrator state (sum of `error * dt`)
    integral: f32,
    /// Error seen on the previous update (for derivative term)
    prev_error: f32,

    /// Saturation bounds, consulted by `AntiWindup::Conditional`
    out_min: f32,
    out_max: f32,

    anti_windup: AntiWindup,
}

impl Pid {
    /// Create a new PID controller with unbounded output and no anti-windup.
    pub fn new(gains: Gains) -> Self {
        Self {
            gains,
            integral: 0.0,
            prev_error: 0.0,
            out_min: f32::NEG_INFINITY,
            out_max: f32::INFINITY,
            anti_windup: AntiWindup::None,
        }
    }

    /// Set the range the caller will saturate the output to.
    pub fn with_output_limits(mut self, min: f32, max: f32) -> Self {
        self.out_min = min;
        self.out_max = max;
        self
    }

    /// Select an anti-windup strategy.
    pub fn with_anti_windup(mut self, anti_windup: AntiWindup) -> Self {
        self.anti_windup = anti_windup;
        self
    }

    #[inline]
    pub fn gains(&self) -> Gains {
        self.gains
    }

    /// Replace one gain. Takes effect on the next update.
    pub fn set_gain(&mut self, which: Gain, value: f32) {
        match which {
            Gain::P => self.gains.kp = value,
            Gain::I => self.gains.ki = value,
            Gain::D => self.gains.kd = value,
        }
    }

    #[inline]
    pub fn integral(&self) -> f32 {
        self.integral
    }

    #[inline]
    pub fn prev_error(&self) -> f32 {
        self.prev_error
    }

    #[inline]
    pub fn anti_windup(&self) -> AntiWindup {
        self.anti_windup
    }

    /// Clear integrator and derivative history. Gains are kept.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
    }

    /// Update the controller.
    ///
    /// `error` - setpoint minus measurement
    /// `dt` - time since the previous update, in seconds
    ///
    /// Returns the raw command `kp * e + ki * ∫e dt + kd * de/dt`.
    pub fn update(&mut self, error: f32, dt: f32) -> f32 {
        let Gains { kp, ki, kd } = self.gains;

        // ----- D term -----
        let derivative = if dt > 0.0 {
            (error - self.prev_error) / dt
        } else {
            0.0
        };

        // ----- I term -----
        let held = self.integral;
        self.integral += error * dt;

        match self.anti_windup {
            AntiWindup::None => {}
            AntiWindup::Limit { min, max } => {
                self.integral = self.integral.clamp(min, max);
            }
            AntiWindup::Conditional => {
                let candidate = kp * error + ki * self.integral + kd * derivative;
                let driving_up = candidate > self.out_max && error > 0.0;
                let driving_down = candidate < self.out_min && error < 0.0;
                if driving_up || driving_down {
                    self.integral = held;
                }
            }
        }

        self.prev_error = error;

        kp * error + ki * self.integral + kd * derivative
    }
}
