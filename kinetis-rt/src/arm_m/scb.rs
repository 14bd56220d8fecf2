//! ARMv6-M System Control Block support.

use crate::arm_m::reg::Reg;

/// The SCB's hardware register layout, as seen on ARMv6-M.
#[allow(dead_code)]
#[repr(C)]
pub struct Registers {
    cpuid:     Reg<u32>,
    icsr:      Reg<u32>,
    vtor:      Reg<u32>,
    aircr:     Reg<u32>,
    scr:       Reg<u32>,
    ccr:       Reg<u32>,
    _reserved: Reg<u32>,
    shpr2:     Reg<u32>,
    shpr3:     Reg<u32>,
}

pub const SCB_ADDRESS : usize = 0xe000ed00;

/// VTOR ignores the low seven bits, so no table can sit on a finer boundary
/// than this.  Larger tables need more: the table's size rounded up to a power
/// of two.  The SoC layer knows its table size and checks that.
pub const VTOR_ALIGN : u32 = 128;

/// Driver for the System Control Block.
pub struct Scb {
    reg: *const Registers,
}

unsafe impl Sync for Scb {}

impl Scb {
    /// Creates a driver for the register block at `reg`.
    ///
    /// # Safety
    ///
    /// `reg` must point at an SCB, real or simulated, that stays valid for as
    /// long as the driver is used.
    pub const unsafe fn at(reg: *const Registers) -> Self {
        Scb { reg }
    }

    fn reg(&self) -> &Registers {
        unsafe { &*self.reg }
    }

    pub fn read_cpuid(&self) -> u32 {
        self.reg().cpuid.get()
    }

    /// Reads the Vector Table Offset Register.
    pub fn read_vtor(&self) -> u32 {
        self.reg().vtor.get()
    }

    /// Points exception dispatch at the table at `address`.  Exceptions taken
    /// after this returns use the new table.
    pub fn write_vtor(&self, address: u32) {
        debug_assert!(address % VTOR_ALIGN == 0,
                      "vector table misaligned for VTOR");
        self.reg().vtor.set(address);
        super::data_synchronization_barrier();
        super::instruction_synchronization_barrier()
    }
}

/// Shared static instance of the `Scb` driver.
pub static SCB: Scb = unsafe { Scb::at(SCB_ADDRESS as *const Registers) };
