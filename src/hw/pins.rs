// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767 brake controller board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, Alternate, Analog, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub status_led: gpiob::PB7<Output<PushPull>>,
    pub usart1: Usart1Pins,
    pub brake: BrakePins,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Brake coil drive and current-sense pins
pub struct BrakePins {
    pub pwm: gpiod::PD12<Alternate<2>>, // TIM4_CH1 (PWM)
    pub shunt: gpioc::PC4<Analog>,      // ADC1_IN14
    pub bus: gpioc::PC5<Analog>,        // ADC1_IN15
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            status_led: gpiob.pb7.into_push_pull_output(),

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            brake: BrakePins {
                pwm: gpiod.pd12.into_alternate::<2>(),
                shunt: gpioc.pc4.into_analog(),
                bus: gpioc.pc5.into_analog(),
            },
        }
    }
}
