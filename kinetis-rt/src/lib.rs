//! Cold-start runtime for Kinetis L-series (ARMv6-M) microcontrollers.
//!
//! The pieces, from the bottom up:
//!
//! - `arm_m`: architecture support (registers, the exception table, the System
//!   Control Block, and the default handler that every unbound vector lands
//!   in).
//! - `mem_init`: prepares RAM before anything else runs, by zeroing `.bss` and
//!   copying initialized data out of flash.
//! - `boot`: programs the minimum hardware state and jumps to the application.
//! - `kl46`: the SoC layer for the MKL46Z4, including its full vector table.
//! - `startup`: the reset handler glue tying the above to the linker script.
//!   Only present on bare-metal targets.

#![cfg_attr(not(test), no_std)]

#![deny(
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    )]

#[macro_use]
mod fmt;

#[macro_use]
pub mod bits;

pub mod arm_m;
pub mod boot;
pub mod mem_init;

#[cfg(feature = "family-kinetis-l")]
pub mod kl46;

#[cfg(all(target_os = "none", feature = "family-kinetis-l"))]
pub mod startup;

mod lang;
