// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Brake controller firmware entry point.
//!
//! Brings up the board, announces itself to the host, then runs the cooperative super-loop:
//! drain host commands, run one control step, report telemetry when due.

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
    timer::Channel1,
};
use stm32f7xx_hal as hal;

use brakectl::config::{
    ControllerConfig, BOOT_GAINS, BUS_ADC_CHANNEL, DEVICE_NAME, HOST_BAUD, PWM_FREQUENCY,
    SHUNT_ADC_CHANNEL, SHUNT_CALIBRATION, TELEMETRY_PERIOD,
};
use brakectl::control::CurrentController;
use brakectl::dispatch::Dispatcher;
use brakectl::drivers::ShuntMonitor;
use brakectl::hw::{Adc, BoardPins, CycleClock, Led, PwmDuty, Usart};
use brakectl::protocol::report;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let core_hz = clocks.sysclk().raw();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD);
    let mut status_led = Led::active_high(pins.status_led);

    // USART1 (host link)
    let usart_cfg = Config {
        baud_rate: HOST_BAUD.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);

    // TIM4_CH1 drives the brake coil, held at 0% until the controller takes over
    let pwm_channel = dp
        .TIM4
        .pwm_hz(Channel1::new(pins.brake.pwm), PWM_FREQUENCY, &clocks)
        .split();
    let brake_output = PwmDuty::new(pwm_channel);

    // ADC1: shunt amplifier + bus divider
    let adc = RefCell::new(Adc::adc1(dp.ADC1));
    let sensor = ShuntMonitor::new(
        Adc::make_reader(&adc, SHUNT_ADC_CHANNEL),
        Adc::make_reader(&adc, BUS_ADC_CHANNEL),
        SHUNT_CALIBRATION,
    );

    // Timing: DWT for the loop clock, SysTick for the blocking release wait
    let clock = CycleClock::dwt(&mut cp.DCB, &mut cp.DWT, core_hz);
    let delay = Delay::new(cp.SYST, core_hz);

    let mut controller = CurrentController::new(
        sensor,
        brake_output,
        clock,
        delay,
        ControllerConfig::default().with_gains(BOOT_GAINS),
    );
    let mut dispatcher = Dispatcher::new(TELEMETRY_PERIOD);

    let _ = report::write_hello(&mut usart, DEVICE_NAME);
    let _ = report::write_ready(&mut usart, &controller.gains());

    loop {
        while let Some(byte) = usart.read_byte() {
            if let Some(Err(err)) = dispatcher.handle_byte(byte, &mut controller) {
                let _ = report::write_error(&mut usart, err);
            }
        }

        if let Some(telemetry) = dispatcher.poll(&mut controller) {
            let _ = report::write_telemetry(&mut usart, &telemetry);
        }

        status_led.set(controller.is_enabled());
    }
}
