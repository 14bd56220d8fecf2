//! RAM initialization.
//!
//! Before any Rust code that touches a `static` can run, two things have to
//! happen:
//!
//! 1. `.bss` (everything the compiler expects to start out zero) is zeroed.
//! 2. Every initialized section that lives in flash but runs from RAM (`.data`
//!    and friends) is copied into place.
//!
//! The linker script describes the second job with a *ROM table*: an array of
//! `RomEntry` records terminated by an all-zero record.  Nothing here checks
//! that sections don't overlap; the linker script is trusted.
//!
//! The actual byte shuffling goes through the `Memory` trait so that the
//! sequencing can be checked against a simulated address space.  On hardware,
//! use `RawMemory`.

use core::ptr;
use core::slice;

/// Byte-level copy and fill over an address space.  Addresses are plain
/// integers: on the target they're physical addresses, in a simulation they're
/// whatever the implementation says they are.
pub trait Memory {
    /// Sets `len` bytes starting at `dest` to `value`.
    ///
    /// # Safety
    ///
    /// `[dest, dest + len)` must be writable and not in use by anything else.
    unsafe fn fill(&mut self, dest: usize, value: u8, len: usize);

    /// Copies `len` bytes from `src` to `dest`.
    ///
    /// # Safety
    ///
    /// Both ranges must be valid, and they must not overlap.
    unsafe fn copy(&mut self, dest: usize, src: usize, len: usize);
}

/// The processor's own address space.
pub struct RawMemory;

impl Memory for RawMemory {
    #[inline]
    unsafe fn fill(&mut self, dest: usize, value: u8, len: usize) {
        ptr::write_bytes(dest as *mut u8, value, len)
    }

    #[inline]
    unsafe fn copy(&mut self, dest: usize, src: usize, len: usize) {
        ptr::copy_nonoverlapping(src as *const u8, dest as *mut u8, len)
    }
}

/// One record of the ROM table: copy `size` bytes from `source` (in flash) to
/// `target` (in RAM).  The layout matches what `link.x` emits.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct RomEntry {
    pub source: usize,
    pub target: usize,
    pub size: usize,
}

impl RomEntry {
    /// The record that ends a ROM table.
    pub const SENTINEL: RomEntry = RomEntry { source: 0, target: 0, size: 0 };

    /// Tables end at the first record with a null source.  The linker emits an
    /// all-zero record, but the source is all we look at.
    pub fn is_sentinel(&self) -> bool {
        self.source == 0
    }
}

/// A ROM table, up to and including its sentinel.
#[derive(Copy, Clone, Debug)]
pub struct RomTable<'a> {
    entries: &'a [RomEntry],
}

impl<'a> RomTable<'a> {
    /// Wraps `entries`.  Iteration stops at the first sentinel, or at the end
    /// of the slice if there isn't one.
    pub fn new(entries: &'a [RomEntry]) -> Self {
        RomTable { entries }
    }

    /// Wraps a linker-provided table.  A null `table` means the image has no
    /// sections to copy, and produces `None`.
    ///
    /// # Safety
    ///
    /// If non-null, `table` must point to a readable array of `RomEntry` that
    /// is terminated by a sentinel, and that outlives `'a`.
    pub unsafe fn from_ptr(table: *const RomEntry) -> Option<Self> {
        if table.is_null() {
            return None;
        }

        let mut len = 0;
        while !(*table.add(len)).is_sentinel() {
            len += 1;
        }
        Some(RomTable::new(slice::from_raw_parts(table, len + 1)))
    }

    /// The records that describe actual copies, in table order.
    pub fn sections(&self) -> impl Iterator<Item = &'a RomEntry> + 'a {
        self.entries.iter().take_while(|e| !e.is_sentinel())
    }
}

/// Error returned when a region's end lies before its beginning.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BadRegion {
    pub begin: usize,
    pub end: usize,
}

/// A half-open byte range `[begin, end)` to be zeroed.  Empty is fine.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZeroRegion {
    begin: usize,
    end: usize,
}

impl ZeroRegion {
    pub fn new(begin: usize, end: usize) -> Result<Self, BadRegion> {
        if begin <= end {
            Ok(ZeroRegion { begin, end })
        } else {
            Err(BadRegion { begin, end })
        }
    }

    pub const fn empty() -> Self {
        ZeroRegion { begin: 0, end: 0 }
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Everything `initialize_memory` needs to know about the image.
#[derive(Copy, Clone, Debug)]
pub struct MemoryLayout<'a> {
    /// `None` when the image has no ROM table at all.
    pub rom_table: Option<RomTable<'a>>,
    /// The `.bss` region.
    pub bss: ZeroRegion,
}

/// What `initialize_memory` did.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitReport {
    pub sections_copied: usize,
    pub bytes_copied: usize,
    pub bytes_zeroed: usize,
}

/// Zeroes `region`.  Returns the number of bytes written, which is zero (and
/// `mem` is never touched) for an empty region.
///
/// # Safety
///
/// `region` must be writable RAM that nothing live is using.
pub unsafe fn zero_fill<M: Memory + ?Sized>(mem: &mut M,
                                            region: ZeroRegion) -> usize {
    if region.is_empty() {
        return 0;
    }
    mem.fill(region.begin(), 0, region.len());
    region.len()
}

/// Performs every copy in `table`, in order, stopping at the sentinel.  `None`
/// is a table with nothing in it.
///
/// # Safety
///
/// Every record must describe a valid, non-overlapping source/target pair.
pub unsafe fn copy_rom_sections<M: Memory + ?Sized>(
    mem: &mut M,
    table: Option<RomTable<'_>>,
) -> InitReport {
    let mut report = InitReport::default();

    if let Some(table) = table {
        for entry in table.sections() {
            mem.copy(entry.target, entry.source, entry.size);
            report.sections_copied += 1;
            report.bytes_copied += entry.size;
        }
    }

    report
}

/// Brings RAM into the state compiled code expects: `.bss` zeroed, then
/// initialized data copied out of flash.
///
/// # Safety
///
/// Must run before anything reads a `static` in the affected regions, and the
/// regions must not hold anything live (including the caller's stack).
pub unsafe fn initialize_memory<M: Memory + ?Sized>(
    mem: &mut M,
    layout: &MemoryLayout<'_>,
) -> InitReport {
    let zeroed = zero_fill(mem, layout.bss);
    let mut report = copy_rom_sections(mem, layout.rom_table);
    report.bytes_zeroed = zeroed;
    report
}
