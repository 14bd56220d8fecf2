//! Cold start: prepare RAM, put the hardware into a known state, and hand
//! over to the application.
//!
//! `cold_boot` is the whole sequence.  Everything after its first step runs
//! with `mem_init` finished, so statics are valid and logging works.

use crate::mem_init::{self, Memory, MemoryLayout};

/// The hardware operations the bootstrap needs.  The SoC layer implements
/// this over its real registers; tests implement it over simulated ones.
///
/// Both operations are plain register writes that can't fail.
pub trait Platform {
    /// Points exception dispatch at the vector table at `address`.  Any
    /// exception taken after this returns uses the new table.
    fn set_vector_table(&self, address: u32);

    /// Stops any watchdog that could reset the part before the application
    /// gets around to servicing it.
    fn disable_watchdog(&self);
}

/// The application entry point.  It never returns; there is nothing to
/// return to.
pub type Entry = fn() -> !;

/// Programs the vector table base and disables the watchdog, in that order.
///
/// `vector_table` is the table's *runtime* address, which matters if it was
/// copied into RAM along with `.data`.
pub fn hardware_init<P: Platform + ?Sized>(platform: &P, vector_table: u32) {
    platform.set_vector_table(vector_table);
    debug!("vector table at {=u32:#x}", vector_table);

    platform.disable_watchdog();
    debug!("watchdog disabled");
}

/// `hardware_init`, then jump to `entry`.  This is the end of the boot
/// sequence.
pub fn bootstrap<P: Platform + ?Sized>(platform: &P,
                                       vector_table: u32,
                                       entry: Entry) -> ! {
    hardware_init(platform, vector_table);
    info!("boot complete, entering application");
    entry()
}

/// The complete reset sequence: `initialize_memory` over `layout`, then
/// `bootstrap`.  Nothing touches the hardware until both memory passes are
/// done.
///
/// # Safety
///
/// Same as `mem_init::initialize_memory`: call once, from reset, before
/// anything reads a static.
pub unsafe fn cold_boot<M, P>(mem: &mut M,
                              layout: &MemoryLayout<'_>,
                              platform: &P,
                              vector_table: u32,
                              entry: Entry) -> !
    where M: Memory + ?Sized,
          P: Platform + ?Sized,
{
    let report = mem_init::initialize_memory(mem, layout);
    info!("memory initialized: {}", report);

    bootstrap(platform, vector_table, entry)
}
