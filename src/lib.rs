// src/lib.rs
//! vidmem - VGA text-mode writer for bare-metal x86_64
//!
//! Copies a character sequence into the legacy text buffer at `0xB8000`,
//! one cell per byte starting at the top-left corner, with the default
//! light-gray-on-black attribute.
//!
//! ```no_run
//! vidmem::init().ok();
//! vidmem::vga_buffer::write(c"OK").ok();
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod errors;
pub mod logging;
pub mod serial;
pub mod vga_buffer;

pub use errors::{DriverError, Result, SerialError, VgaError};

/// Bring up the serial log sink and probe the text buffer
///
/// A missing COM1 port or an already installed logger is not fatal: output
/// then goes wherever the existing setup sends it.
pub fn init() -> Result<()> {
    let serial = serial::init();
    let logger = logging::init(logging::DEFAULT_LEVEL);
    bring_up(serial, logger, vga_buffer::init)
}

fn bring_up(
    serial: core::result::Result<(), SerialError>,
    logger: core::result::Result<(), log::SetLoggerError>,
    probe: impl FnOnce() -> core::result::Result<(), VgaError>,
) -> Result<()> {
    if logger.is_err() {
        log::warn!("vidmem: keeping the logger already installed");
    }
    match serial {
        Ok(()) => log::info!("vidmem: serial logger ready"),
        Err(err) => log::warn!("vidmem: serial init: {}", err),
    }

    probe()?;
    log::info!(
        "vidmem: {}x{} text buffer ready",
        vga_buffer::VGA_WIDTH,
        vga_buffer::VGA_HEIGHT
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    static FIRST: logging::SerialLogger = logging::SerialLogger;

    fn logger_taken() -> core::result::Result<(), log::SetLoggerError> {
        // Whichever call installs first, the second always fails.
        let _ = log::set_logger(&FIRST);
        log::set_logger(&FIRST)
    }

    #[test]
    fn test_existing_logger_still_probes_vga() {
        let probed = Cell::new(false);
        let result = bring_up(Err(SerialError::PortNotPresent), logger_taken(), || {
            probed.set(true);
            Ok(())
        });

        assert_eq!(result, Ok(()));
        assert!(probed.get());
    }

    #[test]
    fn test_probe_failure_is_reported() {
        let result = bring_up(Ok(()), Ok(()), || Err(VgaError::BufferNotAccessible));
        assert_eq!(result, Err(DriverError::Vga(VgaError::BufferNotAccessible)));
    }
}
