//! The complete MKL46Z4 vector table: the 16 architectural vectors followed by
//! the 32 NVIC vectors.

use crate::arm_m::exc::{self, Exception, ExceptionTable, Handler, InitialStack,
                        ResetHandler, EXCEPTION_VECTORS};
use crate::arm_m::scb;
use super::irq::{self, Interrupt, InterruptTable, INTERRUPT_VECTORS};

/// Exception number of IRQ 0.
pub const FIRST_IRQ_VECTOR: usize = EXCEPTION_VECTORS;

/// Total number of vectors.
pub const VECTORS: usize = EXCEPTION_VECTORS + INTERRUPT_VECTORS;

/// Required alignment of the table's address: its size rounded up to a power
/// of two, and never less than what VTOR can express.
pub const TABLE_ALIGN: u32 = {
    let size = (VECTORS as u32 * 4).next_power_of_two();
    if size > scb::VTOR_ALIGN { size } else { scb::VTOR_ALIGN }
};

/// The table the processor reads at reset, and through VTOR afterwards.
///
/// Declare one per image with the default bindings and override what you
/// handle:
///
/// ```ignore
/// #[link_section = ".vector_table"]
/// #[no_mangle]
/// pub static VECTOR_TABLE: VectorTable = VectorTable {
///     interrupts: InterruptTable {
///         pit: my_pit_handler,
///         .. irq::DEFAULT_TABLE
///     },
///     .. VectorTable::new(stack, reset_handler)
/// };
/// ```
///
/// The linker script is responsible for alignment (VTOR needs 256 bytes for a
/// table this size) and for putting it where the core looks at reset.
#[repr(C)]
pub struct VectorTable {
    pub exceptions: ExceptionTable,
    pub interrupts: InterruptTable,
}

impl VectorTable {
    /// A table with every exception and interrupt routed to the default
    /// handler.
    pub const fn new(initial_stack: InitialStack, reset: ResetHandler) -> Self {
        VectorTable {
            exceptions: exc::default_exception_table(initial_stack, reset),
            interrupts: irq::DEFAULT_TABLE,
        }
    }

    pub fn exception_handler(&self, exc: Exception) -> Handler {
        self.exceptions.handler(exc)
    }

    pub fn interrupt_handler(&self, irq: Interrupt) -> Handler {
        self.interrupts.handler(irq)
    }

    /// The table as the processor sees it, one word per vector.
    pub fn words(&self) -> [usize; VECTORS] {
        let mut words = [0; VECTORS];
        words[..FIRST_IRQ_VECTOR].copy_from_slice(&self.exceptions.words());
        words[FIRST_IRQ_VECTOR..].copy_from_slice(&self.interrupts.words());
        words
    }

    /// The word the processor would fetch for exception `number`, or `None`
    /// past the end of the table.
    pub fn vector(&self, number: usize) -> Option<usize> {
        self.words().get(number).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm_m::exc::default_handler;
    use core::mem::size_of;

    unsafe extern "C" fn reset() -> ! {
        loop {}
    }

    extern "C" fn tick() {}
    extern "C" fn pit() {}

    fn table() -> VectorTable {
        VectorTable {
            exceptions: ExceptionTable {
                sys_tick: tick,
                .. exc::default_exception_table(
                    InitialStack::from_address(0x2000_6000), reset)
            },
            interrupts: InterruptTable { pit, .. irq::DEFAULT_TABLE },
        }
    }

    #[test]
    fn table_is_forty_eight_words() {
        assert_eq!(size_of::<VectorTable>(), VECTORS * size_of::<usize>());
        assert_eq!(VECTORS, 48);
    }

    #[test]
    fn interrupts_follow_exceptions() {
        let t = table();
        assert_eq!(t.vector(0), Some(0x2000_6000));
        assert_eq!(t.vector(1), Some(reset as ResetHandler as usize));
        assert_eq!(t.vector(15), Some(tick as Handler as usize));
        assert_eq!(t.vector(Interrupt::Pit.exception_number()),
                   Some(pit as Handler as usize));
        assert_eq!(t.vector(16 + 4), Some(0));
        assert_eq!(t.vector(VECTORS), None);
    }

    #[test]
    fn unbound_sources_resolve_to_default_handler() {
        let t = table();
        assert_eq!(t.interrupt_handler(Interrupt::Uart0) as usize,
                   default_handler as Handler as usize);
        assert_eq!(t.exception_handler(Exception::HardFault) as usize,
                   default_handler as Handler as usize);
    }
}
