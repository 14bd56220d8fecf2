#[path = "common/sim_memory.rs"]
mod sim_memory;

use kinetis_rt::mem_init::{copy_rom_sections, initialize_memory, zero_fill,
                           InitReport, MemoryLayout, RomEntry, RomTable,
                           ZeroRegion};
use sim_memory::SimMemory;

const FILL: u8 = 0xa5;

/// 16 KiB at zero covers every address the scenarios use.
fn memory() -> SimMemory {
    SimMemory::new(0, 0x4000, FILL)
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

#[test]
fn copies_one_section_and_nothing_else() {
    let mut mem = memory();
    let data = pattern(64);
    mem.load(0x1000, &data);

    let entries = [
        RomEntry { source: 0x1000, target: 0x2000, size: 64 },
        RomEntry::SENTINEL,
    ];
    let report = unsafe {
        copy_rom_sections(&mut mem, Some(RomTable::new(&entries)))
    };

    assert_eq!(mem.read(0x2000, 64), &data[..]);
    assert_eq!(mem.read(0x1000, 64), &data[..]);
    assert!(mem.outside(0x1000, 0x1040)
        .filter(|(a, _)| *a < 0x2000 || *a >= 0x2040)
        .all(|(_, b)| b == FILL));
    assert_eq!(report.sections_copied, 1);
    assert_eq!(report.bytes_copied, 64);
}

#[test]
fn zero_fills_exactly_the_region() {
    let mut mem = memory();
    let region = ZeroRegion::new(0x3000, 0x3100).unwrap();

    let written = unsafe { zero_fill(&mut mem, region) };

    assert_eq!(written, 256);
    assert!(mem.read(0x3000, 256).iter().all(|b| *b == 0));
    assert!(mem.outside(0x3000, 0x3100).all(|(_, b)| b == FILL));
}

#[test]
fn empty_region_writes_nothing() {
    let mut mem = memory();
    let region = ZeroRegion::new(0x3000, 0x3000).unwrap();

    let written = unsafe { zero_fill(&mut mem, region) };

    assert_eq!(written, 0);
    assert_eq!(mem.fills, 0);
    assert_eq!(mem.bytes_written, 0);
}

#[test]
fn sentinel_first_means_no_copies() {
    let mut mem = memory();
    let entries = [
        RomEntry::SENTINEL,
        RomEntry { source: 0x1000, target: 0x2000, size: 64 },
    ];

    let report = unsafe {
        copy_rom_sections(&mut mem, Some(RomTable::new(&entries)))
    };

    assert_eq!(report, InitReport::default());
    assert_eq!(mem.copies, 0);
}

#[test]
fn missing_table_is_skipped() {
    let mut mem = memory();
    let report = unsafe { copy_rom_sections(&mut mem, None) };
    assert_eq!(report.sections_copied, 0);
    assert_eq!(mem.bytes_written, 0);
}

#[test]
fn traversal_stops_at_first_sentinel() {
    let mut mem = memory();
    mem.load(0x0100, &pattern(16));
    mem.load(0x0200, &pattern(32));

    // The third record would scribble on 0x3000 if traversal ran past the
    // sentinel.
    let entries = [
        RomEntry { source: 0x0100, target: 0x2000, size: 16 },
        RomEntry { source: 0x0200, target: 0x2100, size: 32 },
        RomEntry::SENTINEL,
        RomEntry { source: 0x0100, target: 0x3000, size: 16 },
    ];
    let report = unsafe {
        copy_rom_sections(&mut mem, Some(RomTable::new(&entries)))
    };

    assert_eq!(report.sections_copied, 2);
    assert_eq!(report.bytes_copied, 48);
    assert_eq!(mem.copies, 2);
    assert!(mem.read(0x3000, 16).iter().all(|b| *b == FILL));
}

#[test]
fn sections_are_copied_in_table_order() {
    let mut mem = memory();
    mem.load(0x0100, &[1; 8]);
    mem.load(0x0200, &[2; 8]);

    // Both records target 0x2000; the later one must win.
    let entries = [
        RomEntry { source: 0x0100, target: 0x2000, size: 8 },
        RomEntry { source: 0x0200, target: 0x2000, size: 8 },
        RomEntry::SENTINEL,
    ];
    let _ = unsafe {
        copy_rom_sections(&mut mem, Some(RomTable::new(&entries)))
    };

    assert_eq!(mem.read(0x2000, 8), &[2; 8]);
}

#[test]
fn initialize_memory_does_both_passes() {
    let mut mem = memory();
    let data = pattern(64);
    mem.load(0x1000, &data);

    let entries = [
        RomEntry { source: 0x1000, target: 0x2000, size: 64 },
        RomEntry::SENTINEL,
    ];
    let layout = MemoryLayout {
        rom_table: Some(RomTable::new(&entries)),
        bss: ZeroRegion::new(0x3000, 0x3100).unwrap(),
    };

    let report = unsafe { initialize_memory(&mut mem, &layout) };

    assert_eq!(report, InitReport {
        sections_copied: 1,
        bytes_copied: 64,
        bytes_zeroed: 256,
    });
    assert_eq!(mem.read(0x2000, 64), &data[..]);
    assert!(mem.read(0x3000, 256).iter().all(|b| *b == 0));
    assert_eq!(mem.bytes_written, 64 + 256);
}

#[test]
fn initialize_memory_with_nothing_to_do() {
    let mut mem = memory();
    let layout = MemoryLayout {
        rom_table: None,
        bss: ZeroRegion::empty(),
    };

    let report = unsafe { initialize_memory(&mut mem, &layout) };

    assert_eq!(report, InitReport::default());
    assert_eq!(mem.bytes_written, 0);
}

#[test]
fn linker_style_table_from_pointer() {
    let mut mem = memory();
    let data = pattern(20);
    mem.load(0x1000, &data);

    let entries = [
        RomEntry { source: 0x1000, target: 0x2800, size: 20 },
        RomEntry::SENTINEL,
    ];
    let table = unsafe { RomTable::from_ptr(entries.as_ptr()) };
    let report = unsafe { copy_rom_sections(&mut mem, table) };

    assert_eq!(report.sections_copied, 1);
    assert_eq!(mem.read(0x2800, 20), &data[..]);
}
