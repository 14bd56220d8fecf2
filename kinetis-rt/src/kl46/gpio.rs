//! General Purpose I/O (GPIO) support.
//!
//! On the KL46 the GPIO unit only drives and samples pins.  Routing a pin to
//! GPIO in the first place is the PORT's job (see `port::Port::set_mux`).
//!
//! Unlike parts that need read-modify-write for this, every GPIO port has
//! dedicated set, clear, and toggle registers, so pin updates are single
//! stores and safe against interrupts.

#![allow(trivial_numeric_casts)]  // required for bitflags :-(

use bitflags::bitflags;

use crate::arm_m::reg::Reg;

/// A GPIO port's memory mapped registers.
#[repr(C)]
pub struct Registers {
    pdor: Reg<u32>,
    psor: Reg<u32>,
    pcor: Reg<u32>,
    ptor: Reg<u32>,
    pdir: Reg<u32>,
    pddr: Reg<u32>,
}

bitflags! {
    /// Names a group of pins on a single GPIO port.  Every operation can be
    /// applied to any subset of pins for the same cost as a single pin, so
    /// all pin methods take a `PinMask`.
    pub struct PinMask: u32 {
        const P0 = 1 << 0;
        const P1 = 1 << 1;
        const P2 = 1 << 2;
        const P3 = 1 << 3;
        const P4 = 1 << 4;
        const P5 = 1 << 5;
        const P6 = 1 << 6;
        const P7 = 1 << 7;
        const P8 = 1 << 8;
        const P9 = 1 << 9;
        const P10 = 1 << 10;
        const P11 = 1 << 11;
        const P12 = 1 << 12;
        const P13 = 1 << 13;
        const P14 = 1 << 14;
        const P15 = 1 << 15;
        const P16 = 1 << 16;
        const P17 = 1 << 17;
        const P18 = 1 << 18;
        const P19 = 1 << 19;
        const P20 = 1 << 20;
        const P21 = 1 << 21;
        const P22 = 1 << 22;
        const P23 = 1 << 23;
        const P24 = 1 << 24;
        const P25 = 1 << 25;
        const P26 = 1 << 26;
        const P27 = 1 << 27;
        const P28 = 1 << 28;
        const P29 = 1 << 29;
        const P30 = 1 << 30;
        const P31 = 1 << 31;
    }
}

/// Pin direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Input,
    Output,
}

/// GPIO port driver.
pub struct GpioPort {
    reg: *const Registers,
}

unsafe impl Sync for GpioPort {}

impl GpioPort {
    /// # Safety
    ///
    /// `reg` must point at a GPIO block, real or simulated, that stays valid
    /// for as long as the driver is used.
    pub const unsafe fn at(reg: *const Registers) -> Self {
        GpioPort { reg }
    }

    /// Changes the direction of the pins selected by `pins`.
    pub fn set_direction(&self, pins: PinMask, dir: Direction) {
        let pddr = &self.reg().pddr;
        match dir {
            Direction::Output => pddr.update(|v| v | pins.bits()),
            Direction::Input => pddr.update(|v| v & !pins.bits()),
        }
    }

    /// Reads the state of pins selected by `pins`.  The returned `PinMask`
    /// contains those pins that were observed as logic high.
    #[inline]
    pub fn get(&self, pins: PinMask) -> PinMask {
        PinMask::from_bits_truncate(self.reg().pdir.get()) & pins
    }

    /// Sets pins selected by `pins` to logic high.
    #[inline]
    pub fn set(&self, pins: PinMask) {
        self.reg().psor.set(pins.bits())
    }

    /// Clears pins selected by `pins` to logic low.
    #[inline]
    pub fn clear(&self, pins: PinMask) {
        self.reg().pcor.set(pins.bits())
    }

    /// Inverts pins selected by `pins`.
    #[inline]
    pub fn toggle(&self, pins: PinMask) {
        self.reg().ptor.set(pins.bits())
    }

    /// The value last written to the output latch.
    pub fn output(&self) -> PinMask {
        PinMask::from_bits_truncate(self.reg().pdor.get())
    }

    fn reg(&self) -> &Registers {
        unsafe { &*self.reg }
    }
}

macro_rules! static_gpio {
    ($name:ident, $addr:expr) => {
        pub static $name: GpioPort = unsafe {
            GpioPort::at($addr as *const Registers)
        };
    };
}

static_gpio!(GPIOA, 0x400ff000);
static_gpio!(GPIOB, 0x400ff040);
static_gpio!(GPIOC, 0x400ff080);
static_gpio!(GPIOD, 0x400ff0c0);
static_gpio!(GPIOE, 0x400ff100);
