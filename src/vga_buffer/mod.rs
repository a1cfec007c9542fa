// src/vga_buffer/mod.rs

//! VGA text mode writer with interrupt-safe Mutex protection
//!
//! The global writer owns the text buffer at `0xB8000` and copies a
//! character sequence into it starting at the top-left cell, encoding every
//! byte with [`DEFAULT_TEXT_ATTRIBUTE`].
//!
//! # Safety and Robustness
//!
//! - [`write`] and [`write_bytes`] are bounds-checked and reject sequences
//!   longer than the screen with [`VgaError::BufferOverflow`].
//! - [`write_unchecked`] keeps the historical contract (terminator only, no
//!   bounds checks) and is `unsafe`.
//! - Every access runs with interrupts disabled while holding the lock, so a
//!   handler on the same CPU can neither deadlock nor interleave cell writes.
//! - Nothing logs while the lock is held; rejected writes are reported after
//!   it is released.

mod backend;
mod cell;
mod color;
mod constants;
mod writer;

pub use backend::{MemoryBuffer, TextModeBuffer, VgaBufferAccess};
pub use cell::ScreenChar;
pub use color::{ColorCode, DEFAULT_TEXT_ATTRIBUTE, VgaColor};
pub use constants::{
    BUFFER_SIZE, BYTES_PER_CELL, CELL_COUNT, SENTINEL, VGA_BUFFER_ADDR, VGA_HEIGHT, VGA_WIDTH,
};
pub use writer::DisplayWriter;

use crate::errors::VgaError;
use core::ffi::CStr;
use spin::Mutex;
use x86_64::instructions::interrupts;

/// Global VGA writer protected by Mutex
///
/// # Locking Order
///
/// Never take the serial lock (or log) inside `with_writer`. Both locks are
/// only held with interrupts disabled, and neither is held while taking the
/// other.
static VGA_WRITER: Mutex<DisplayWriter<TextModeBuffer>> =
    Mutex::new(DisplayWriter::new(TextModeBuffer::new()));

/// Execute a function with the VGA writer, protected from interrupts
fn with_writer<F, R>(f: F) -> R
where
    F: FnOnce(&mut DisplayWriter<TextModeBuffer>) -> R,
{
    interrupts::without_interrupts(|| f(&mut VGA_WRITER.lock()))
}

/// Read cell 0 and write it back
///
/// Should be called once during bring-up, after the bootloader has switched
/// the display into 80x25 text mode. The hardware backend cannot detect an
/// unmapped buffer, so this only exercises the access path.
pub fn init() -> Result<(), VgaError> {
    with_writer(|writer| writer.probe())?;
    log::debug!("vga: text buffer at {:#x}", VGA_BUFFER_ADDR);
    Ok(())
}

/// Write a NUL-terminated string to the screen, starting at cell 0
pub fn write(s: &CStr) -> Result<usize, VgaError> {
    write_bytes(s.to_bytes())
}

/// Write `bytes` (up to the first NUL, if any) to the screen, starting at cell 0
pub fn write_bytes(bytes: &[u8]) -> Result<usize, VgaError> {
    let result = with_writer(|writer| writer.write_bytes(bytes));
    if let Err(err) = result {
        log::warn!("vga: {} byte write rejected: {}", bytes.len(), err);
    }
    result
}

/// Write a sentinel-terminated sequence with no bounds checking.
///
/// # Safety
///
/// `ptr` must point to a readable, NUL-terminated byte sequence. If it is
/// longer than [`CELL_COUNT`] the excess lands in the memory following the
/// text buffer.
pub unsafe fn write_unchecked(ptr: *const u8) {
    // SAFETY: forwarded from the caller.
    with_writer(|writer| unsafe { writer.write_unchecked(ptr) });
}

/// C entry point with the historical name and contract.
///
/// # Safety
///
/// See [`write_unchecked`].
#[cfg(feature = "legacy-abi")]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vidmemwrite(s: *const core::ffi::c_char) {
    // SAFETY: forwarded from the caller.
    unsafe { write_unchecked(s.cast()) }
}
