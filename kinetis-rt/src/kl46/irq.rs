//! Interrupt vectors for the MKL46Z4.
//!
//! This module provides:
//! - `struct InterruptTable` for modeling the vendor-specific vector table.
//! - `enum Interrupt` naming each source by its IRQ number.

use crate::arm_m::exc::{default_handler, Reserved};

/// Re-export the type used for interrupt vectors on ARMv6-M.
pub use crate::arm_m::exc::Handler;

/// Number of words in the vendor part of the vector table.
pub const INTERRUPT_VECTORS: usize = 32;

/// The KL46's vendor-specific (NVIC) vector table.  This is separate from
/// the ARMv6-M Exception Table, and must be placed immediately after it.
///
/// As with the exception table, every source has a handler; IRQ 4 is
/// reserved and is always zero.
#[repr(C)]
pub struct InterruptTable {
    /// DMA channel 0 transfer complete and error.
    pub dma0: Handler,
    pub dma1: Handler,
    pub dma2: Handler,
    pub dma3: Handler,
    pub _reserved4: Reserved,
    /// Flash command complete and read collision.
    pub ftfa: Handler,
    /// Low-voltage detect and warning.
    pub pmc: Handler,
    /// Low-leakage wakeup.
    pub llwu: Handler,
    pub i2c0: Handler,
    pub i2c1: Handler,
    pub spi0: Handler,
    pub spi1: Handler,
    /// UART0 status and error.
    pub uart0: Handler,
    pub uart1: Handler,
    pub uart2: Handler,
    pub adc0: Handler,
    pub cmp0: Handler,
    pub tpm0: Handler,
    pub tpm1: Handler,
    pub tpm2: Handler,
    pub rtc_alarm: Handler,
    pub rtc_seconds: Handler,
    /// All PIT channels share this vector.
    pub pit: Handler,
    pub i2s0: Handler,
    pub usb_otg: Handler,
    pub dac0: Handler,
    pub tsi0: Handler,
    pub mcg: Handler,
    pub lptmr0: Handler,
    pub slcd: Handler,
    pub port_a: Handler,
    /// Ports C and D share a vector.
    pub port_cd: Handler,
}

/// An `InterruptTable` with every source routed to `default_handler`.  This
/// can be used with struct update syntax to declare a vector table that
/// handles only a few sources:
///
/// ```ignore
/// static INTERRUPTS : InterruptTable = InterruptTable {
///     pit: my_pit_handler,
///     .. DEFAULT_TABLE
/// };
/// ```
pub const DEFAULT_TABLE : InterruptTable = InterruptTable {
    dma0: default_handler,
    dma1: default_handler,
    dma2: default_handler,
    dma3: default_handler,
    _reserved4: Reserved::ZERO,
    ftfa: default_handler,
    pmc: default_handler,
    llwu: default_handler,
    i2c0: default_handler,
    i2c1: default_handler,
    spi0: default_handler,
    spi1: default_handler,
    uart0: default_handler,
    uart1: default_handler,
    uart2: default_handler,
    adc0: default_handler,
    cmp0: default_handler,
    tpm0: default_handler,
    tpm1: default_handler,
    tpm2: default_handler,
    rtc_alarm: default_handler,
    rtc_seconds: default_handler,
    pit: default_handler,
    i2s0: default_handler,
    usb_otg: default_handler,
    dac0: default_handler,
    tsi0: default_handler,
    mcg: default_handler,
    lptmr0: default_handler,
    slcd: default_handler,
    port_a: default_handler,
    port_cd: default_handler,
};

/// Internal utility macro tying each `Interrupt` to its IRQ number and its
/// `InterruptTable` field.
macro_rules! interrupts {
    ($($name:ident = $irq:expr => $field:ident,)*) => {
        /// Names the KL46's interrupt sources.  Discriminants are IRQ numbers
        /// (exception number minus 16).
        #[derive(Copy, Clone, Debug, Eq, PartialEq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum Interrupt {
            $($name = $irq,)*
        }

        impl Interrupt {
            /// Every source, in IRQ order.
            pub const ALL: [Interrupt; INTERRUPT_VECTORS - 1] = [
                $(Interrupt::$name,)*
            ];
        }

        impl InterruptTable {
            /// The handler bound to `irq`.
            pub fn handler(&self, irq: Interrupt) -> Handler {
                match irq {
                    $(Interrupt::$name => self.$field,)*
                }
            }
        }
    };
}

interrupts! {
    Dma0       =  0 => dma0,
    Dma1       =  1 => dma1,
    Dma2       =  2 => dma2,
    Dma3       =  3 => dma3,
    // 4 is reserved
    Ftfa       =  5 => ftfa,
    Pmc        =  6 => pmc,
    Llwu       =  7 => llwu,
    I2c0       =  8 => i2c0,
    I2c1       =  9 => i2c1,
    Spi0       = 10 => spi0,
    Spi1       = 11 => spi1,
    Uart0      = 12 => uart0,
    Uart1      = 13 => uart1,
    Uart2      = 14 => uart2,
    Adc0       = 15 => adc0,
    Cmp0       = 16 => cmp0,
    Tpm0       = 17 => tpm0,
    Tpm1       = 18 => tpm1,
    Tpm2       = 19 => tpm2,
    RtcAlarm   = 20 => rtc_alarm,
    RtcSeconds = 21 => rtc_seconds,
    Pit        = 22 => pit,
    I2s0       = 23 => i2s0,
    UsbOtg     = 24 => usb_otg,
    Dac0       = 25 => dac0,
    Tsi0       = 26 => tsi0,
    Mcg        = 27 => mcg,
    Lptmr0     = 28 => lptmr0,
    Slcd       = 29 => slcd,
    PortA      = 30 => port_a,
    PortCD     = 31 => port_cd,
}

impl Interrupt {
    pub fn irq(self) -> usize {
        self as usize
    }

    /// Index of this interrupt's vector in the full table.
    pub fn exception_number(self) -> usize {
        super::vectors::FIRST_IRQ_VECTOR + self.irq()
    }
}

impl InterruptTable {
    /// The table as the processor sees it, one word per vector.
    pub fn words(&self) -> [usize; INTERRUPT_VECTORS] {
        let mut words = [0; INTERRUPT_VECTORS];
        for irq in Interrupt::ALL.iter() {
            words[irq.irq()] = self.handler(*irq) as usize;
        }
        words[4] = self._reserved4.word();
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;

    extern "C" fn pit() {}

    #[test]
    fn table_is_thirty_two_words() {
        assert_eq!(size_of::<InterruptTable>(),
                   INTERRUPT_VECTORS * size_of::<usize>());
    }

    #[test]
    fn all_lists_every_irq_but_the_reserved_one() {
        let irqs: Vec<usize> = Interrupt::ALL.iter().map(|i| i.irq()).collect();
        let expected: Vec<usize> =
            (0..INTERRUPT_VECTORS).filter(|&n| n != 4).collect();
        assert_eq!(irqs, expected);
    }

    #[test]
    fn fields_sit_at_their_irq_offsets() {
        let table = InterruptTable { pit, .. DEFAULT_TABLE };
        let base = &table as *const InterruptTable as usize;
        let field = &table.pit as *const Handler as usize;
        assert_eq!((field - base) / size_of::<usize>(), Interrupt::Pit.irq());
        assert_eq!(table.words()[22], pit as Handler as usize);
    }

    #[test]
    fn default_table_has_no_holes_except_irq4() {
        for (n, word) in DEFAULT_TABLE.words().iter().enumerate() {
            if n == 4 {
                assert_eq!(*word, 0);
            } else {
                assert_eq!(*word, default_handler as Handler as usize);
            }
        }
    }
}
