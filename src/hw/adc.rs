// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Basic ADC1 support for STM32F7 using direct PAC register access.
//!
//! Blocking single-channel reads of the current-sense signals.
//!
//! Example:
//! ```ignore
//! let adc = RefCell::new(Adc::adc1(dp.ADC1));
//! let read_shunt = Adc::make_reader(&adc, SHUNT_ADC_CHANNEL);
//! ```

use core::cell::RefCell;

use stm32f7xx_hal::pac;

/// ADC1 wrapper.
pub struct Adc {
    adc: pac::ADC1,
}

impl Adc {
    /// Create and initialize ADC1: 12-bit, right-aligned, software trigger.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // Long sample time on the current-sense channels (10..=18 live in SMPR1)
        adc1.smpr1.modify(|_, w| w.smp14().bits(0b111).smp15().bits(0b111));

        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Read a single channel.
    pub fn read(&self, channel: u8) -> u16 {
        let adc = &self.adc;

        // Sequence length = 1 conversion
        adc.sqr1.modify(|_, w| w.l().bits(0));
        adc.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits() as u16
    }

    /// Create a closure that reads the given channel from the ADC reference.
    pub fn make_reader<'a>(adc_ref: &'a RefCell<Self>, channel: u8) -> impl FnMut() -> u16 + 'a {
        move || adc_ref.borrow().read(channel)
    }
}
