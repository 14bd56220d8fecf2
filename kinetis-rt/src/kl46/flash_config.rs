//! The Flash Configuration Field.
//!
//! Sixteen bytes at 0x400 (placed by `link.x`) that the flash controller loads at reset: the
//! backdoor key, program-protection bits, and the security byte.  Getting the
//! security byte wrong locks the debugger out, so every image should carry
//! this field explicitly rather than leaving it to whatever the linker puts
//! there.

use crate::bits::{bitfield_extract, FromBitsTotal};

bit_enums! {
    /// The `SEC` field of `FSEC`.  Only one of the four encodings is unsecure.
    pub bit_enum Security {
        Secure0 = 0b00,
        Secure1 = 0b01,
        Unsecure = 0b10,
        Secure3 = 0b11,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct FlashConfig {
    pub backdoor_key: [u8; 8],
    /// `FPROT3` first.  A set bit leaves that region unprotected.
    pub fprot: [u8; 4],
    pub fsec: u8,
    pub fopt: u8,
    pub feprot: u8,
    pub fdprot: u8,
}

impl FlashConfig {
    /// Unsecured, nothing protected, backdoor disabled, default boot options.
    pub const UNSECURED: FlashConfig = FlashConfig {
        backdoor_key: [0xff; 8],
        fprot: [0xff; 4],
        fsec: 0xfe,
        fopt: 0xff,
        feprot: 0xff,
        fdprot: 0xff,
    };

    pub fn security(&self) -> Security {
        Security::from_bits_total(bitfield_extract(u32::from(self.fsec), 1, 0))
    }

    /// Whether the backdoor key can be used to unsecure the part.
    pub fn backdoor_enabled(&self) -> bool {
        bitfield_extract(u32::from(self.fsec), 7, 6) == 0b10
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;

    #[test]
    fn field_is_sixteen_bytes() {
        assert_eq!(size_of::<FlashConfig>(), 16);
    }

    #[test]
    fn default_leaves_the_part_unsecured() {
        assert_eq!(FlashConfig::UNSECURED.security(), Security::Unsecure);
        assert!(!FlashConfig::UNSECURED.backdoor_enabled());
    }

    #[test]
    fn erased_flash_is_secure() {
        let erased = FlashConfig { fsec: 0xff, .. FlashConfig::UNSECURED };
        assert_eq!(erased.security(), Security::Secure3);
    }
}
