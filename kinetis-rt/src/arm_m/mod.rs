//! ARMv6-M architecture support.
//!
//! Everything in here is common to M-profile parts regardless of vendor.  The
//! handful of operations that need real instructions are only available as
//! such when compiling for ARM; hosted builds get stand-ins so the rest of the
//! runtime can be exercised off-target.

pub mod exc;
pub mod reg;
pub mod scb;

#[cfg(target_arch = "arm")]
use core::arch::asm;

/// Generates an instruction synchronization barrier (`ISB`) instruction.  For
/// other types of barriers, see Rust's fence operations.
#[inline]
pub fn instruction_synchronization_barrier() {
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!("isb", options(nostack, preserves_flags))
    }
}

/// Generates a data synchronization barrier (`DSB`) instruction.  Register
/// writes issued before this have completed by the time it retires.
#[inline]
pub fn data_synchronization_barrier() {
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!("dsb", options(nostack, preserves_flags))
    }

    #[cfg(not(target_arch = "arm"))]
    core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst);
}

/// Executes a `BKPT` instruction.  With a debugger attached, the core halts
/// here in debug state; without one, this escalates to HardFault.
///
/// Hosted builds have no debugger to trap into, so the breakpoint is counted
/// instead.  See `breakpoint_count`.
#[inline(always)]
pub fn breakpoint() {
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!("bkpt #0", options(nomem, nostack, preserves_flags))
    }

    #[cfg(not(target_arch = "arm"))]
    {
        let _ = host::BREAKPOINTS
            .fetch_add(1, core::sync::atomic::Ordering::SeqCst);
    }
}

/// Number of times `breakpoint` has executed in this process.  Only exists on
/// hosted builds.
#[cfg(not(target_arch = "arm"))]
pub fn breakpoint_count() -> usize {
    host::BREAKPOINTS.load(core::sync::atomic::Ordering::SeqCst)
}

#[cfg(not(target_arch = "arm"))]
mod host {
    use core::sync::atomic::AtomicUsize;

    pub static BREAKPOINTS: AtomicUsize = AtomicUsize::new(0);
}

/// Traps into the debugger and then parks the processor forever.  This is the
/// terminal state for anything we didn't plan for.
///
/// If someone resumes from the breakpoint, we spin right here rather than
/// returning into whatever context faulted.
#[inline(never)]
pub fn halt() -> ! {
    breakpoint();
    loop {
        core::hint::spin_loop()
    }
}
