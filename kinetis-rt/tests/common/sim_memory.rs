#![allow(dead_code)]

use std::ops::Range;

use kinetis_rt::mem_init::Memory;

/// A flat simulated address space starting at `base`.  Flash and RAM are just
/// different addresses in the same buffer.
pub struct SimMemory {
    base: usize,
    bytes: Vec<u8>,
    /// Calls to `fill`.
    pub fills: usize,
    /// Calls to `copy`.
    pub copies: usize,
    /// Bytes written through the `Memory` trait, by either operation.
    pub bytes_written: usize,
}

impl SimMemory {
    /// `size` bytes at `base`, every one set to `pattern` so stray writes
    /// show up.
    pub fn new(base: usize, size: usize, pattern: u8) -> Self {
        SimMemory {
            base,
            bytes: vec![pattern; size],
            fills: 0,
            copies: 0,
            bytes_written: 0,
        }
    }

    fn range(&self, addr: usize, len: usize) -> Range<usize> {
        assert!(addr >= self.base, "address {:#x} below simulated memory", addr);
        let start = addr - self.base;
        assert!(start + len <= self.bytes.len(),
                "range {:#x}+{:#x} past simulated memory", addr, len);
        start..start + len
    }

    pub fn read(&self, addr: usize, len: usize) -> &[u8] {
        let r = self.range(addr, len);
        &self.bytes[r]
    }

    /// Setup helper; not counted as a write.
    pub fn load(&mut self, addr: usize, data: &[u8]) {
        let r = self.range(addr, data.len());
        self.bytes[r].copy_from_slice(data);
    }

    /// Every byte outside `[begin, end)`, with its address.
    pub fn outside(&self, begin: usize, end: usize)
        -> impl Iterator<Item = (usize, u8)> + '_
    {
        let base = self.base;
        self.bytes.iter().enumerate()
            .map(move |(i, b)| (base + i, *b))
            .filter(move |(a, _)| *a < begin || *a >= end)
    }
}

impl Memory for SimMemory {
    unsafe fn fill(&mut self, dest: usize, value: u8, len: usize) {
        let r = self.range(dest, len);
        self.bytes[r].fill(value);
        self.fills += 1;
        self.bytes_written += len;
    }

    unsafe fn copy(&mut self, dest: usize, src: usize, len: usize) {
        let s = self.range(src, len);
        let d = self.range(dest, len);
        assert!(s.end <= d.start || d.end <= s.start,
                "overlapping copy {:#x} -> {:#x}", src, dest);
        self.bytes.copy_within(s, d.start);
        self.copies += 1;
        self.bytes_written += len;
    }
}
