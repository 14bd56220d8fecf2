//! Image-level items: the vector table, the flash configuration field, and
//! the application.

use core::arch::asm;
use core::ptr::addr_of;

use cortex_m as _; // critical-section implementation for the logger
use defmt_rtt as _; // global logger
use panic_probe as _;

use kinetis_rt::arm_m::{self, exc::{self, ExceptionTable, InitialStack}};
use kinetis_rt::kl46::flash_config::FlashConfig;
use kinetis_rt::kl46::irq;
use kinetis_rt::kl46::gpio::{Direction, PinMask, GPIOD};
use kinetis_rt::kl46::port::{Mux, PORTD};
use kinetis_rt::kl46::sim::{Scgc5, SIM};
use kinetis_rt::kl46::VectorTable;
use kinetis_rt::startup;

/******************************************************************************/

// Image environment.

extern "C" {
    /// This symbol is exported by the linker script, and defines the initial
    /// stack pointer.
    static _stack_start: u32;
}

/// The ROM vector table.  The linker script places `.vector_table` at the
/// start of flash, where the core fetches the initial stack pointer and reset
/// vector, and keeps everything reachable from it.
///
/// Only the hard fault is bound here; every other source stays on the
/// default handler.
#[link_section = ".vector_table"]
#[no_mangle]
#[used]
pub static VECTOR_TABLE: VectorTable = VectorTable {
    exceptions: ExceptionTable {
        hard_fault,
        .. exc::default_exception_table(
            InitialStack::new(unsafe { addr_of!(_stack_start) }),
            reset_handler)
    },
    interrupts: irq::DEFAULT_TABLE,
};

/// Leaves the part unsecured so the debugger can always get back in.
#[link_section = ".flash_config"]
#[no_mangle]
#[used]
pub static FLASH_CONFIG: FlashConfig = FlashConfig::UNSECURED;

/// This function will be "called" by the processor at reset.
unsafe extern "C" fn reset_handler() -> ! {
    startup::cold_start(app)
}

extern "C" fn hard_fault() {
    defmt::error!("hard fault");
    arm_m::halt()
}

/******************************************************************************/

// Application.

/// The green LED is on PTD5 and lights when the pin is driven low.
const GREEN_LED_PIN: usize = 5;
const GREEN_LED: PinMask = PinMask::P5;

/// The application entry point.  RAM is set up and the COP is off by the
/// time we get here.
fn app() -> ! {
    SIM.enable_clocks(Scgc5::PORTD);
    PORTD.set_mux(GREEN_LED_PIN, Mux::Gpio);

    GPIOD.set(GREEN_LED);
    GPIOD.set_direction(GREEN_LED, Direction::Output);

    defmt::info!("blinking");

    loop {
        GPIOD.clear(GREEN_LED);
        hackish_delay();
        GPIOD.set(GREEN_LED);
        hackish_delay();
    }
}

fn hackish_delay() {
    for _ in 0 .. 500_000 {
        unsafe { asm!("nop") }
    }
}
