//! Rust runtime startup for bare-metal KL46 images.
//!
//! To make use of this module, put a reset handler like this one in your
//! vector table:
//!
//! ```ignore
//! unsafe extern "C" fn reset_handler() -> ! {
//!     kinetis_rt::startup::cold_start(app)
//! }
//!
//! fn app() -> ! {
//!     // code here
//!     loop {}
//! }
//! ```
//!
//! The linker script (`link.x` in the firmware crate) must define these
//! symbols:
//!
//! - `_vector_table`: runtime address of the vector table.
//! - `_rom_table`: the ROM table, see `mem_init::RomEntry`.
//! - `_bss` / `_ebss`: bounds of `.bss`.

use core::ptr::{addr_of, addr_of_mut};

use crate::arm_m;
use crate::boot::{self, Entry};
use crate::kl46::KL46;
use crate::mem_init::{MemoryLayout, RawMemory, RomEntry, RomTable, ZeroRegion};

extern "C" {
    static _vector_table: u32;
    static _rom_table: RomEntry;
    static mut _bss: u8;
    static mut _ebss: u8;
}

/// Runs `boot::cold_boot` over the real memory and hardware, with the layout
/// taken from the linker script.
///
/// Note that none of the Rust environment has been established when this is
/// called: statics hold garbage until `initialize_memory` returns, so nothing
/// before that point may touch one (or log).
///
/// # Safety
///
/// Call exactly once, from the reset handler, on the reset stack.
#[inline(never)]
pub unsafe fn cold_start(entry: Entry) -> ! {
    let bss = match ZeroRegion::new(addr_of_mut!(_bss) as usize,
                                    addr_of_mut!(_ebss) as usize) {
        Ok(r) => r,
        // The linker script is broken; nothing sensible to do.
        Err(_) => arm_m::halt(),
    };

    let layout = MemoryLayout {
        rom_table: RomTable::from_ptr(addr_of!(_rom_table)),
        bss,
    };

    boot::cold_boot(&mut RawMemory, &layout, &KL46,
                    addr_of!(_vector_table) as u32, entry)
}
