//! Typed access to packed register fields.
//!
//! A register's contents get a newtype (`bit_wrappers!`), each field gets a
//! getter/builder pair (`bitfield_accessors!`), and multi-bit fields with
//! named encodings get an enum (`bit_enums!`).  Everything is plain `u32`
//! shifting underneath.

/// Error type indicating that some bits read from the hardware weren't valid
/// for the expected type.  This usually indicates a driver bug, but can also
/// indicate misbehaving hardware.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BadBits(pub u32);

/// Result type for `BadBits`.
pub type BitsResult<T> = Result<T, BadBits>;

/// Fallible conversion from a field's raw bits.  Used for fields where some
/// encodings are reserved.
pub trait FromBits: Sized {
    fn from_bits(bits: u32) -> BitsResult<Self>;
}

/// Conversion from a field's raw bits where every encoding that fits in the
/// field is meaningful.  Out-of-range input is a bug in the caller.
pub trait FromBitsTotal {
    fn from_bits_total(bits: u32) -> Self;
}

/// Conversion to a field's raw bits.  Must not panic.
pub trait IntoBits {
    fn into_bits(self) -> u32;
}

impl FromBits for bool {
    fn from_bits(bits: u32) -> BitsResult<Self> {
        match bits {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(BadBits(bits)),
        }
    }
}

impl FromBitsTotal for bool {
    fn from_bits_total(bits: u32) -> Self {
        bits != 0
    }
}

impl FromBitsTotal for u32 {
    fn from_bits_total(bits: u32) -> Self {
        bits
    }
}

impl IntoBits for bool {
    fn into_bits(self) -> u32 {
        u32::from(self)
    }
}

impl IntoBits for u32 {
    fn into_bits(self) -> u32 {
        self
    }
}

/// Ties a register newtype to its raw representation so the accessor macros
/// can rebuild it.
pub trait BitsWrapper {
    type Raw;

    fn from_raw(v: Self::Raw) -> Self;
}

#[inline(always)]
fn field_mask(hi: usize, lo: usize) -> u32 {
    let width = hi - lo + 1;
    if width < u32::BITS as usize {
        (1 << width) - 1
    } else {
        !0
    }
}

/// Given a value `v`, extracts bits `hi` through `lo` (inclusive).
#[inline(always)]
pub fn bitfield_extract(v: u32, hi: usize, lo: usize) -> u32 {
    (v >> lo) & field_mask(hi, lo)
}

/// Given a value `orig`, replaces bits `hi` through `lo` (inclusive) with the
/// same number of low-order bits from `new`.
#[inline(always)]
pub fn bitfield_replace(orig: u32, hi: usize, lo: usize, new: u32) -> u32 {
    let mask = field_mask(hi, lo);
    (orig & !(mask << lo)) | ((new & mask) << lo)
}

/// Declares register newtypes:
///
/// ```ignore
/// bit_wrappers! {
///     pub struct Copc(pub u32);
/// }
/// ```
macro_rules! bit_wrappers {
    () => {};
    ($(#[$m:meta])* pub struct $name:ident(pub $ty:ty); $($rest:tt)*) => {
        #[derive(Copy, Clone, Debug, Eq, PartialEq)]
        $(#[$m])*
        pub struct $name(pub $ty);

        impl $crate::bits::BitsWrapper for $name {
            type Raw = $ty;

            fn from_raw(v: Self::Raw) -> Self {
                $name(v)
            }
        }

        bit_wrappers!{$($rest)*}
    };
}

/// Declares getter/builder pairs inside an `impl` for a `bit_wrappers!` type:
///
/// ```ignore
/// bitfield_accessors! {
///     pub total [0] get_copw / with_copw: bool,
///     pub [3:2] get_copt / with_copt: CopTimeout,
/// }
/// ```
///
/// Fields marked `total` return `T` directly; the rest return
/// `BitsResult<T>` so reserved encodings surface as errors.
macro_rules! bitfield_accessors {
    () => {};

    ($(#[$m:meta])* pub [$bit:tt] $get:ident / $with:ident : $ty:ty,
     $($rest:tt)*) => {
        bitfield_accessors! {
            @partial $(#[$m])* [$bit : $bit] $get / $with : $ty
        }
        bitfield_accessors!{ $($rest)* }
    };

    ($(#[$m:meta])* pub total [$bit:tt] $get:ident / $with:ident : $ty:ty,
     $($rest:tt)*) => {
        bitfield_accessors! {
            @total $(#[$m])* [$bit : $bit] $get / $with : $ty
        }
        bitfield_accessors!{ $($rest)* }
    };

    ($(#[$m:meta])* pub [$hi:tt : $lo:tt] $get:ident / $with:ident : $ty:ty,
     $($rest:tt)*) => {
        bitfield_accessors! {
            @partial $(#[$m])* [$hi : $lo] $get / $with : $ty
        }
        bitfield_accessors!{ $($rest)* }
    };

    ($(#[$m:meta])* pub total [$hi:tt : $lo:tt] $get:ident / $with:ident : $ty:ty,
     $($rest:tt)*) => {
        bitfield_accessors! {
            @total $(#[$m])* [$hi : $lo] $get / $with : $ty
        }
        bitfield_accessors!{ $($rest)* }
    };

    (@partial $(#[$m:meta])* [$hi:tt : $lo:tt] $get:ident / $with:ident : $ty:ty) => {
        $(#[$m])*
        #[inline]
        pub fn $get(self) -> $crate::bits::BitsResult<$ty> {
            <$ty as $crate::bits::FromBits>::from_bits(
                $crate::bits::bitfield_extract(self.0, $hi, $lo))
        }

        bitfield_accessors! { @with $(#[$m])* [$hi : $lo] $with : $ty }
    };

    (@total $(#[$m:meta])* [$hi:tt : $lo:tt] $get:ident / $with:ident : $ty:ty) => {
        $(#[$m])*
        #[inline]
        pub fn $get(self) -> $ty {
            <$ty as $crate::bits::FromBitsTotal>::from_bits_total(
                $crate::bits::bitfield_extract(self.0, $hi, $lo))
        }

        bitfield_accessors! { @with $(#[$m])* [$hi : $lo] $with : $ty }
    };

    (@with $(#[$m:meta])* [$hi:tt : $lo:tt] $with:ident : $ty:ty) => {
        $(#[$m])*
        #[inline]
        pub fn $with(self, v: $ty) -> Self {
            $crate::bits::BitsWrapper::from_raw(
                $crate::bits::bitfield_replace(
                    self.0, $hi, $lo,
                    <$ty as $crate::bits::IntoBits>::into_bits(v)))
        }
    };
}

/// Declares enums with a bidirectional mapping to small bit patterns.  Every
/// variant needs an explicit value:
///
/// ```ignore
/// bit_enums! {
///     pub bit_enum CopTimeout {
///         Disabled = 0b00,
///         Short = 0b01,
///     }
/// }
/// ```
///
/// The generated `FromBitsTotal` impl panics on an unlisted pattern, so only
/// use `total` accessors with enums that cover their whole field.
macro_rules! bit_enums {
    () => {};
    (
        $(#[$m:meta])*
        pub bit_enum $name:ident {
            $($e_name:ident = $e_val:expr,)+
        }
        $($rest:tt)*
    ) => {
        #[derive(Copy, Clone, Debug, Eq, PartialEq)]
        $(#[$m])*
        pub enum $name {
            $($e_name = $e_val),+
        }

        impl $crate::bits::IntoBits for $name {
            fn into_bits(self) -> u32 {
                self as u32
            }
        }

        impl $crate::bits::FromBits for $name {
            fn from_bits(bits: u32) -> $crate::bits::BitsResult<Self> {
                match bits {
                    $(x if x == $e_val => Ok($name::$e_name),)+
                    _ => Err($crate::bits::BadBits(bits)),
                }
            }
        }

        impl $crate::bits::FromBitsTotal for $name {
            fn from_bits_total(bits: u32) -> Self {
                match <$name as $crate::bits::FromBits>::from_bits(bits) {
                    Ok(v) => v,
                    Err(_) => unreachable!(),
                }
            }
        }

        bit_enums!{$($rest)*}
    };
}
