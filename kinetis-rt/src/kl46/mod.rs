//! SoC layer for the NXP MKL46Z4 (Cortex-M0+, 256 KiB flash, 32 KiB SRAM).

pub mod flash_config;
pub mod gpio;
pub mod irq;
pub mod port;
pub mod sim;
pub mod vectors;

pub use self::vectors::VectorTable;

use crate::arm_m::scb::{self, Scb};
use crate::boot::Platform;

/// The hardware the boot sequence touches on this part: the SCB for VTOR and
/// the SIM for the COP watchdog.
pub struct Kl46<'a> {
    scb: &'a Scb,
    sim: &'a sim::Sim,
}

impl<'a> Kl46<'a> {
    /// Uses the given drivers.  Tests point these at simulated register
    /// blocks.
    pub const fn new(scb: &'a Scb, sim: &'a sim::Sim) -> Self {
        Kl46 { scb, sim }
    }
}

/// The real hardware.
pub static KL46: Kl46<'static> = Kl46::new(&scb::SCB, &sim::SIM);

impl Platform for Kl46<'_> {
    fn set_vector_table(&self, address: u32) {
        debug_assert!(address % vectors::TABLE_ALIGN == 0,
                      "vector table misaligned for its size");
        self.scb.write_vtor(address)
    }

    fn disable_watchdog(&self) {
        self.sim.disable_cop()
    }
}
