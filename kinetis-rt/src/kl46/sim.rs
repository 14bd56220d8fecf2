//! System Integration Module (SIM) support.
//!
//! The SIM is a grab bag.  We use it for two things: gating clocks to
//! peripherals, and the COP ("computer operating properly") watchdog, which
//! comes out of reset *enabled* with a timeout of about a second.

#![allow(trivial_numeric_casts)]  // required for bitflags :-(

use bitflags::bitflags;

use crate::arm_m::reg::Reg;

/// The SIM's hardware register layout, starting at `SIM_ADDRESS`.  (`SOPT1`
/// lives on its own page at 0x4004_7000 and isn't modeled.)
#[allow(dead_code)]
#[repr(C)]
pub struct Registers {
    _reserved0: Reg<u32>,
    sopt2:      Reg<u32>,
    _reserved1: Reg<u32>,
    sopt4:      Reg<u32>,
    sopt5:      Reg<u32>,
    _reserved2: Reg<u32>,
    sopt7:      Reg<u32>,
    _reserved3: [Reg<u32>; 2],
    sdid:       Reg<u32>,
    _reserved4: [Reg<u32>; 3],
    scgc4:      Reg<u32>,
    scgc5:      Reg<u32>,
    scgc6:      Reg<u32>,
    scgc7:      Reg<u32>,
    clkdiv1:    Reg<u32>,
    _reserved5: Reg<u32>,
    fcfg1:      Reg<u32>,
    fcfg2:      Reg<u32>,
    _reserved6: Reg<u32>,
    uidmh:      Reg<u32>,
    uidml:      Reg<u32>,
    uidl:       Reg<u32>,
    _reserved7: [Reg<u32>; 39],
    copc:       Reg<u32>,
    srvcop:     Reg<u32>,
}

pub const SIM_ADDRESS : usize = 0x40048000;

bit_wrappers! {
    /// COP Control Register.  Write-once after reset: the first write wins
    /// and later writes are ignored until the next reset.
    pub struct Copc(pub u32);
}

bit_enums! {
    /// COP timeout selection.  `Disabled` is the only setting that stops the
    /// watchdog.
    pub bit_enum CopTimeout {
        Disabled = 0b00,
        Short = 0b01,
        Medium = 0b10,
        Long = 0b11,
    }
}

impl Copc {
    /// The register value that turns the COP off.
    pub const DISABLED: Copc = Copc(0);

    bitfield_accessors! {
        pub total [3:2] get_copt / with_copt: CopTimeout,
        /// Clock select: bus clock when set, 1 kHz LPO when clear.
        pub total [1] get_copclks / with_copclks: bool,
        /// Windowed mode.
        pub total [0] get_copw / with_copw: bool,
    }
}

bitflags! {
    /// Clock gates in `SCGC5`.  A peripheral's registers fault on access
    /// until its gate is open.
    pub struct Scgc5: u32 {
        const LPTMR = 1 << 0;
        const TSI   = 1 << 5;
        const PORTA = 1 << 9;
        const PORTB = 1 << 10;
        const PORTC = 1 << 11;
        const PORTD = 1 << 12;
        const PORTE = 1 << 13;
        const SLCD  = 1 << 19;
    }
}

/// SIM driver.
pub struct Sim {
    reg: *const Registers,
}

unsafe impl Sync for Sim {}

impl Sim {
    /// Creates a driver for the register block at `reg`.
    ///
    /// # Safety
    ///
    /// `reg` must point at a SIM, real or simulated, that stays valid for as
    /// long as the driver is used.
    pub const unsafe fn at(reg: *const Registers) -> Self {
        Sim { reg }
    }

    fn reg(&self) -> &Registers {
        unsafe { &*self.reg }
    }

    pub fn read_copc(&self) -> Copc {
        Copc(self.reg().copc.get())
    }

    pub fn write_copc(&self, v: Copc) {
        self.reg().copc.set(v.0)
    }

    /// Turns the COP watchdog off.  Since `COPC` is write-once, this has to
    /// be the first write to it after reset to stick.
    pub fn disable_cop(&self) {
        self.write_copc(Copc::DISABLED)
    }

    pub fn read_scgc5(&self) -> Scgc5 {
        Scgc5::from_bits_truncate(self.reg().scgc5.get())
    }

    /// Opens the clock gates in `gates`, leaving the others as they were.
    pub fn enable_clocks(&self, gates: Scgc5) {
        self.reg().scgc5.update(|v| v | gates.bits())
    }

    /// Reads the System Device Identification register.
    pub fn read_sdid(&self) -> u32 {
        self.reg().sdid.get()
    }
}

/// Shared instance of the `Sim` driver.
pub static SIM: Sim = unsafe { Sim::at(SIM_ADDRESS as *const Registers) };
