//! Support for memory-mapped registers of various sizes.

use core::cell::UnsafeCell;
use core::ptr;

/// A register whose contents can be represented as `T`.  The contents are
/// accessed using `volatile` operations only, ensuring that apparently dead
/// loads and stores are not optimized away.
///
/// Memory-mapped registers are the ultimate ambient authority, and are
/// inherently shared.  Thus, registers (like cells) can be mutated through a
/// shared reference `&`, and a unique reference `&mut` to a register is not
/// particularly meaningful.  Transitively, the same applies to structs that
/// group registers together, as in a memory-mapped peripheral.
///
/// Register blocks built from `Reg` are plain memory as far as Rust is
/// concerned, so a zeroed block can also live in ordinary RAM.  Tests use this
/// to stand in for the hardware.
#[repr(transparent)]
pub struct Reg<T> {
    value: UnsafeCell<T>,
}

impl<T: Copy> Reg<T> {
    /// Reads the contents of the register using a volatile load.
    #[inline]
    pub fn get(&self) -> T {
        unsafe { ptr::read_volatile(self.value.get()) }
    }

    /// Replaces the contents of the register using a volatile store.
    #[inline]
    pub fn set(&self, value: T) {
        unsafe { ptr::write_volatile(self.value.get(), value) }
    }

    /// Read-modify-write.  Not atomic: ARMv6-M has no exclusive monitors, so
    /// callers racing with interrupts must arrange exclusion themselves.
    pub fn update<F: FnOnce(T) -> T>(&self, f: F) {
        self.set(f(self.get()))
    }
}
