// src/vga_buffer/constants.rs

//! Hardware contract for the legacy VGA text buffer

/// VGA text buffer physical memory address
pub const VGA_BUFFER_ADDR: usize = 0xb8000;

/// Screen dimensions
pub const VGA_WIDTH: usize = 80;
pub const VGA_HEIGHT: usize = 25;

/// Total number of cells in the VGA buffer
pub const CELL_COUNT: usize = VGA_WIDTH * VGA_HEIGHT;

/// Bytes per cell (1 byte character + 1 byte attribute)
pub const BYTES_PER_CELL: usize = 2;

/// Total buffer size in bytes
pub const BUFFER_SIZE: usize = CELL_COUNT * BYTES_PER_CELL;

/// Terminator marking the end of a character sequence
pub const SENTINEL: u8 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_layout_matches_hardware() {
        assert_eq!(BYTES_PER_CELL, core::mem::size_of::<u16>());
        assert_eq!(BUFFER_SIZE, 4000);
        assert_eq!(CELL_COUNT, 2000);
    }
}
