// src/vga_buffer/backend.rs

//! Low-level VGA buffer access abstractions.
//!
//! [`VgaBufferAccess`] lets the [`DisplayWriter`](super::DisplayWriter) target
//! either the text-mode buffer at `0xB8000` or an in-memory array used by host
//! tests and off-screen composition.

use super::cell::ScreenChar;
use super::constants::{CELL_COUNT, VGA_BUFFER_ADDR};
use crate::errors::VgaError;
use core::ptr::NonNull;

/// Abstraction over the VGA character buffer memory.
pub trait VgaBufferAccess {
    /// Total number of addressable character cells.
    fn capacity(&self) -> usize {
        CELL_COUNT
    }

    /// Read the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::InvalidPosition`] when `index` is outside the
    /// buffer.
    fn read_cell(&self, index: usize) -> Result<ScreenChar, VgaError>;

    /// Write `value` to the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::InvalidPosition`] when `index` is outside the
    /// buffer.
    fn write_cell(&mut self, index: usize, value: ScreenChar) -> Result<(), VgaError>;

    /// Store `value` at `index` without any bounds or accessibility check.
    ///
    /// # Safety
    ///
    /// The cell at `index` must be valid, writable memory. For the hardware
    /// backend an index past [`capacity`](Self::capacity) lands in whatever
    /// physical memory follows the text buffer.
    unsafe fn write_cell_unchecked(&mut self, index: usize, value: ScreenChar);
}

/// Concrete backend that talks to the legacy text-mode buffer at 0xB8000.
#[derive(Debug, Clone, Copy)]
pub struct TextModeBuffer {
    ptr: NonNull<ScreenChar>,
}

// SAFETY: the pointer designates a fixed hardware region, not thread-local
// data; exclusive access is arranged by the owner (see `VGA_WRITER`).
unsafe impl Send for TextModeBuffer {}

impl TextModeBuffer {
    /// Construct a new text-mode backend.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            // SAFETY: 0xB8000 is the canonical VGA text buffer address and is non-null.
            ptr: unsafe { NonNull::new_unchecked(VGA_BUFFER_ADDR as *mut ScreenChar) },
        }
    }

    #[inline]
    const fn is_valid_index(index: usize) -> bool {
        index < CELL_COUNT
    }
}

impl VgaBufferAccess for TextModeBuffer {
    fn read_cell(&self, index: usize) -> Result<ScreenChar, VgaError> {
        if !Self::is_valid_index(index) {
            return Err(VgaError::InvalidPosition);
        }

        // SAFETY: index is within the 80x25 text buffer, which the firmware
        // keeps identity-mapped while text mode is active.
        Ok(unsafe { core::ptr::read_volatile(self.ptr.as_ptr().add(index)) })
    }

    fn write_cell(&mut self, index: usize, value: ScreenChar) -> Result<(), VgaError> {
        if !Self::is_valid_index(index) {
            return Err(VgaError::InvalidPosition);
        }

        // SAFETY: bounds checked above.
        unsafe { self.write_cell_unchecked(index, value) };
        Ok(())
    }

    #[inline]
    unsafe fn write_cell_unchecked(&mut self, index: usize, value: ScreenChar) {
        // SAFETY: upheld by the caller. Volatile so the store reaches the
        // device even though nothing reads it back.
        unsafe {
            core::ptr::write_volatile(self.ptr.as_ptr().wrapping_add(index), value);
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

impl Default for TextModeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory cell array with the same geometry as the hardware buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBuffer {
    cells: [ScreenChar; CELL_COUNT],
    accessible: bool,
}

impl MemoryBuffer {
    /// Create a zeroed, accessible buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self::filled(ScreenChar::from_raw(0))
    }

    /// Create an accessible buffer with every cell set to `value`.
    #[must_use]
    pub const fn filled(value: ScreenChar) -> Self {
        Self {
            cells: [value; CELL_COUNT],
            accessible: true,
        }
    }

    /// Create a buffer that rejects every checked access.
    #[must_use]
    pub const fn inaccessible() -> Self {
        Self {
            cells: [ScreenChar::from_raw(0); CELL_COUNT],
            accessible: false,
        }
    }

    /// Borrow the raw cell contents.
    pub fn cells(&self) -> &[ScreenChar] {
        &self.cells
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl VgaBufferAccess for MemoryBuffer {
    fn read_cell(&self, index: usize) -> Result<ScreenChar, VgaError> {
        if !self.accessible {
            return Err(VgaError::BufferNotAccessible);
        }
        self.cells
            .get(index)
            .copied()
            .ok_or(VgaError::InvalidPosition)
    }

    fn write_cell(&mut self, index: usize, value: ScreenChar) -> Result<(), VgaError> {
        if !self.accessible {
            return Err(VgaError::BufferNotAccessible);
        }
        self.cells
            .get_mut(index)
            .map(|cell| {
                *cell = value;
            })
            .ok_or(VgaError::InvalidPosition)
    }

    #[inline]
    unsafe fn write_cell_unchecked(&mut self, index: usize, value: ScreenChar) {
        // SAFETY: upheld by the caller.
        unsafe {
            *self.cells.get_unchecked_mut(index) = value;
        }
    }
}
