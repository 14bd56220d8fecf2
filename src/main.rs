//! Blinks the green LED on an FRDM-KL46Z board.
//!
//! The image only does anything on the board itself.  Hosted builds (which
//! `cargo test` at the workspace root will produce) get an empty `main`.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod firmware;

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("frdm-blink runs on the board; build for thumbv6m-none-eabi");
}
