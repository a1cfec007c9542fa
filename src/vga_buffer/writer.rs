// src/vga_buffer/writer.rs

//! Display writer: copies a character sequence into the VGA buffer starting
//! at cell zero.
//!
//! Output position tracks input position one-to-one. There is no cursor, no
//! wrapping and no scrolling; cells past the end of the sequence are left as
//! they were.

use super::backend::VgaBufferAccess;
use super::cell::ScreenChar;
use super::color::DEFAULT_TEXT_ATTRIBUTE;
use super::constants::SENTINEL;
use crate::errors::VgaError;
use core::ffi::CStr;

/// Writes terminated byte sequences into a [`VgaBufferAccess`] backend.
#[derive(Debug)]
pub struct DisplayWriter<B> {
    buffer: B,
}

impl<B: VgaBufferAccess> DisplayWriter<B> {
    pub const fn new(buffer: B) -> Self {
        Self { buffer }
    }

    /// Number of addressable cells in the backend
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Non-destructive accessibility check: reads cell 0 and writes it back.
    pub fn probe(&mut self) -> Result<(), VgaError> {
        let original = self.buffer.read_cell(0)?;
        self.buffer.write_cell(0, original)
    }

    /// Write `bytes` from cell 0 onward.
    ///
    /// The sequence ends at the first [`SENTINEL`] byte or at the end of the
    /// slice. Returns the number of cells written.
    ///
    /// Does not log, so it is safe to call with the global writer locked.
    ///
    /// # Errors
    ///
    /// [`VgaError::BufferOverflow`] if the sequence does not fit; the buffer is
    /// left untouched in that case. Backend errors are passed through.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, VgaError> {
        let len = sequence_len(bytes);
        let capacity = self.buffer.capacity();
        if len > capacity {
            return Err(VgaError::BufferOverflow);
        }

        for (index, &byte) in bytes[..len].iter().enumerate() {
            self.buffer
                .write_cell(index, ScreenChar::new(byte, DEFAULT_TEXT_ATTRIBUTE))?;
        }
        Ok(len)
    }

    /// Write a NUL-terminated string from cell 0 onward.
    ///
    /// # Errors
    ///
    /// Same as [`write_bytes`](Self::write_bytes).
    pub fn write_cstr(&mut self, s: &CStr) -> Result<usize, VgaError> {
        self.write_bytes(s.to_bytes())
    }

    /// Unchecked write of a sentinel-terminated sequence.
    ///
    /// Walks `ptr` until the terminator and stores each byte with the default
    /// attribute. Nothing is bounds-checked and nothing is reported.
    ///
    /// # Safety
    ///
    /// - `ptr` must point to a readable byte sequence that contains a
    ///   [`SENTINEL`] and is not mutated during the call.
    /// - Every cell up to the sequence length must be writable memory of the
    ///   backend. Sequences longer than [`capacity`](Self::capacity) write
    ///   past the end of the buffer.
    pub unsafe fn write_unchecked(&mut self, ptr: *const u8) {
        let mut index = 0;
        loop {
            // SAFETY: the caller guarantees the sequence is readable up to and
            // including its terminator.
            let byte = unsafe { ptr.add(index).read() };
            if byte == SENTINEL {
                break;
            }
            // SAFETY: the caller guarantees cell `index` is writable.
            unsafe {
                self.buffer
                    .write_cell_unchecked(index, ScreenChar::new(byte, DEFAULT_TEXT_ATTRIBUTE));
            }
            index += 1;
        }
    }

    /// Read a single cell back.
    pub fn read_cell(&self, index: usize) -> Result<ScreenChar, VgaError> {
        self.buffer.read_cell(index)
    }

    /// Copy cells starting at 0 into `out`.
    ///
    /// Returns the number of cells copied, at most `capacity()`.
    pub fn read_into(&self, out: &mut [ScreenChar]) -> Result<usize, VgaError> {
        let count = out.len().min(self.buffer.capacity());
        for (index, slot) in out[..count].iter_mut().enumerate() {
            *slot = self.buffer.read_cell(index)?;
        }
        Ok(count)
    }
}

/// Length of `bytes` up to, not including, the first terminator
fn sequence_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|&b| b == SENTINEL)
        .unwrap_or(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::super::backend::MemoryBuffer;
    use super::super::constants::CELL_COUNT;
    use super::*;

    fn cell(byte: u8) -> ScreenChar {
        ScreenChar::new(byte, DEFAULT_TEXT_ATTRIBUTE)
    }

    fn writer() -> DisplayWriter<MemoryBuffer> {
        DisplayWriter::new(MemoryBuffer::filled(ScreenChar::from_raw(0x1f20)))
    }

    #[test]
    fn test_sequence_len() {
        assert_eq!(sequence_len(b""), 0);
        assert_eq!(sequence_len(b"abc"), 3);
        assert_eq!(sequence_len(b"ab\0c"), 2);
        assert_eq!(sequence_len(b"\0"), 0);
    }

    #[test]
    fn test_write_ok() {
        let mut w = writer();
        assert_eq!(w.write_cstr(c"OK"), Ok(2));

        assert_eq!(w.read_cell(0), Ok(cell(b'O')));
        assert_eq!(w.read_cell(1), Ok(cell(b'K')));
        assert_eq!(w.read_cell(2), Ok(ScreenChar::from_raw(0x1f20)));
    }

    #[test]
    fn test_embedded_terminator_ends_sequence() {
        let mut w = writer();
        assert_eq!(w.write_bytes(b"hi\0there"), Ok(2));
        assert_eq!(w.read_cell(2), Ok(ScreenChar::from_raw(0x1f20)));
    }

    #[test]
    fn test_overflow_leaves_buffer_untouched() {
        let mut w = writer();
        let before = w.buffer().clone();
        let long = [b'x'; CELL_COUNT + 1];

        assert_eq!(w.write_bytes(&long), Err(VgaError::BufferOverflow));
        assert_eq!(w.buffer(), &before);
    }

    #[test]
    fn test_exact_capacity_fits() {
        let mut w = writer();
        let full = [b'y'; CELL_COUNT];

        assert_eq!(w.write_bytes(&full), Ok(CELL_COUNT));
        assert!(w.buffer().cells().iter().all(|&c| c == cell(b'y')));
    }

    #[test]
    fn test_inaccessible_backend_reports_error() {
        let mut w = DisplayWriter::new(MemoryBuffer::inaccessible());
        assert_eq!(w.write_bytes(b"a"), Err(VgaError::BufferNotAccessible));
        assert_eq!(w.probe(), Err(VgaError::BufferNotAccessible));
    }

    #[test]
    fn test_probe_is_non_destructive() {
        let mut w = writer();
        w.write_bytes(b"Z").unwrap();
        let before = w.buffer().clone();

        assert_eq!(w.probe(), Ok(()));
        assert_eq!(w.buffer(), &before);
    }

    #[test]
    fn test_write_unchecked_matches_checked() {
        let mut checked = writer();
        let mut unchecked = writer();

        checked.write_cstr(c"legacy path").unwrap();
        unsafe { unchecked.write_unchecked(c"legacy path".as_ptr().cast()) };
        assert_eq!(checked.buffer(), unchecked.buffer());
    }

    #[test]
    fn test_write_unchecked_empty_is_noop() {
        let mut w = writer();
        let before = w.buffer().clone();

        unsafe { w.write_unchecked(c"".as_ptr().cast()) };
        assert_eq!(w.buffer(), &before);
    }

    #[test]
    fn test_read_into_clamps_to_capacity() {
        let mut w = writer();
        w.write_bytes(b"abc").unwrap();

        let mut out = [ScreenChar::default(); 4];
        assert_eq!(w.read_into(&mut out), Ok(4));
        assert_eq!(out[..3], [cell(b'a'), cell(b'b'), cell(b'c')]);

        let mut big = std::vec![ScreenChar::default(); CELL_COUNT + 10];
        assert_eq!(w.read_into(&mut big), Ok(CELL_COUNT));
    }
}
