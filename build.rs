// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Build script for the brake controller firmware.
//!
//! Host builds (library + tests) need no linker configuration. Bare-metal firmware builds get the
//! `cortex-m-rt` linker script, plus the `defmt` one when logging is enabled. The memory layout
//! itself comes from the HAL's `rt` feature.

use std::env;

fn main() {
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let firmware = env::var_os("CARGO_FEATURE_FIRMWARE").is_some();
    let defmt = env::var_os("CARGO_FEATURE_DEFMT").is_some();

    if target_os == "none" && firmware {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        if defmt {
            println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
