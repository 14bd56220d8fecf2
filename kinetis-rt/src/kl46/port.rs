//! Port Control and Interrupts (PORT) support.
//!
//! Each pin's function is chosen by the MUX field of its Pin Control
//! Register.  GPIO is alternative 1 on every pin.

use crate::arm_m::reg::Reg;

#[allow(dead_code)]
#[repr(C)]
pub struct Registers {
    pcr:       [Reg<u32>; 32],
    gpclr:     Reg<u32>,
    gpchr:     Reg<u32>,
    _reserved: [Reg<u32>; 6],
    isfr:      Reg<u32>,
}

bit_enums! {
    /// Pin multiplexing.  What `Alt2` and up mean depends on the pin; see the
    /// signal multiplexing chapter of the reference manual.
    pub bit_enum Mux {
        Disabled = 0,
        Gpio = 1,
        Alt2 = 2,
        Alt3 = 3,
        Alt4 = 4,
        Alt5 = 5,
        Alt6 = 6,
        Alt7 = 7,
    }
}

bit_wrappers! {
    /// Pin Control Register.
    pub struct Pcr(pub u32);
}

impl Pcr {
    bitfield_accessors! {
        /// Interrupt status flag; write one to clear.
        pub total [24] get_isf / with_isf: bool,
        pub total [10:8] get_mux / with_mux: Mux,
        /// High drive strength (only on the high-drive pins).
        pub total [6] get_dse / with_dse: bool,
        /// Passive input filter.
        pub total [4] get_pfe / with_pfe: bool,
        /// Slow slew rate.
        pub total [2] get_sre / with_sre: bool,
        /// Pull enable.
        pub total [1] get_pe / with_pe: bool,
        /// Pull select: up when set, down when clear.
        pub total [0] get_ps / with_ps: bool,
    }
}

/// PORT driver.
pub struct Port {
    reg: *const Registers,
}

unsafe impl Sync for Port {}

impl Port {
    /// # Safety
    ///
    /// `reg` must point at a PORT block, real or simulated, that stays valid
    /// for as long as the driver is used, and its clock gate must be open
    /// before any method is called.
    pub const unsafe fn at(reg: *const Registers) -> Self {
        Port { reg }
    }

    fn reg(&self) -> &Registers {
        unsafe { &*self.reg }
    }

    pub fn read_pcr(&self, pin: usize) -> Pcr {
        Pcr(self.reg().pcr[pin].get())
    }

    pub fn write_pcr(&self, pin: usize, v: Pcr) {
        self.reg().pcr[pin].set(v.0)
    }

    pub fn update_pcr<F: FnOnce(Pcr) -> Pcr>(&self, pin: usize, f: F) {
        self.write_pcr(pin, f(self.read_pcr(pin)))
    }

    /// Routes `pin` to `mux`, leaving its other settings alone.
    pub fn set_mux(&self, pin: usize, mux: Mux) {
        self.update_pcr(pin, |v| v.with_mux(mux).with_isf(false))
    }
}

macro_rules! static_port {
    ($name:ident, $addr:expr) => {
        pub static $name: Port = unsafe { Port::at($addr as *const Registers) };
    };
}

static_port!(PORTA, 0x40049000);
static_port!(PORTB, 0x4004a000);
static_port!(PORTC, 0x4004b000);
static_port!(PORTD, 0x4004c000);
static_port!(PORTE, 0x4004d000);
