// src/serial.rs

//! Serial port driver (COM1), used as the log sink
//!
//! Provides UART output on COM1 (0x3F8) with:
//! - 38400 baud rate
//! - 8 data bits, no parity, 1 stop bit (8N1)
//! - FIFO enabled, transmit-empty polling with a bounded spin

use crate::errors::SerialError;
use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, Ordering};
use spin::Mutex;
use x86_64::instructions::interrupts;
use x86_64::instructions::port::Port;

/// COM1 base I/O port address
pub const SERIAL_IO_PORT: u16 = 0x3F8;

/// 115200 / 38400
const BAUD_RATE_DIVISOR: u16 = 3;

const DLAB_ENABLE: u8 = 0x80;
const CONFIG_8N1: u8 = 0x03;
const FIFO_ENABLE_CLEAR: u8 = 0xC7;
const MODEM_CTRL_ENABLE_IRQ_RTS_DSR: u8 = 0x0B;
const LSR_TRANSMIT_EMPTY: u8 = 0x20;

const SCRATCH_TEST_PRIMARY: u8 = 0xAA;
const SCRATCH_TEST_SECONDARY: u8 = 0x55;

/// Spins to wait for the transmit holding register before dropping a byte
const TIMEOUT_ITERATIONS: u32 = 10_000;

/// Register offsets from base port
mod register_offset {
    pub const DATA: u16 = 0;
    pub const INTERRUPT_ENABLE: u16 = 1;
    pub const FIFO_CONTROL: u16 = 2;
    pub const LINE_CONTROL: u16 = 3;
    pub const MODEM_CONTROL: u16 = 4;
    pub const LINE_STATUS: u16 = 5;
    pub const SCRATCH: u16 = 7;
}

static SERIAL_INITIALIZED: AtomicBool = AtomicBool::new(false);
static SERIAL_PORT_AVAILABLE: AtomicBool = AtomicBool::new(false);

struct SerialPorts {
    data: Port<u8>,
    interrupt_enable: Port<u8>,
    fifo: Port<u8>,
    line_control: Port<u8>,
    modem_control: Port<u8>,
    line_status: Port<u8>,
    scratch: Port<u8>,
}

impl SerialPorts {
    const fn new() -> Self {
        Self {
            data: Port::new(SERIAL_IO_PORT + register_offset::DATA),
            interrupt_enable: Port::new(SERIAL_IO_PORT + register_offset::INTERRUPT_ENABLE),
            fifo: Port::new(SERIAL_IO_PORT + register_offset::FIFO_CONTROL),
            line_control: Port::new(SERIAL_IO_PORT + register_offset::LINE_CONTROL),
            modem_control: Port::new(SERIAL_IO_PORT + register_offset::MODEM_CONTROL),
            line_status: Port::new(SERIAL_IO_PORT + register_offset::LINE_STATUS),
            scratch: Port::new(SERIAL_IO_PORT + register_offset::SCRATCH),
        }
    }

    fn configure(&mut self) {
        // SAFETY: fixed COM1 registers, serialized by the `SERIAL_PORTS` mutex.
        unsafe {
            self.interrupt_enable.write(0x00);
            self.line_control.write(DLAB_ENABLE);
            self.data.write((BAUD_RATE_DIVISOR & 0xFF) as u8);
            self.interrupt_enable
                .write(((BAUD_RATE_DIVISOR >> 8) & 0xFF) as u8);
            self.line_control.write(CONFIG_8N1);
            self.fifo.write(FIFO_ENABLE_CLEAR);
            self.modem_control.write(MODEM_CTRL_ENABLE_IRQ_RTS_DSR);
        }
    }

    /// Write then read back the scratch register
    ///
    /// The scratch register has no side effects; on machines without a UART
    /// reads float to 0xFF.
    fn scratch_roundtrip(&mut self, value: u8) -> u8 {
        // SAFETY: see `configure`.
        unsafe {
            self.scratch.write(value);
            self.scratch.read()
        }
    }

    /// Returns `false` if the transmitter never became ready.
    fn poll_and_write(&mut self, byte: u8) -> bool {
        // SAFETY: see `configure`.
        unsafe {
            for _ in 0..TIMEOUT_ITERATIONS {
                if (self.line_status.read() & LSR_TRANSMIT_EMPTY) != 0 {
                    self.data.write(byte);
                    return true;
                }
                core::hint::spin_loop();
            }
        }
        false
    }
}

static SERIAL_PORTS: Mutex<SerialPorts> = Mutex::new(SerialPorts::new());

/// Detect and configure COM1
pub fn init() -> Result<(), SerialError> {
    claim(&SERIAL_INITIALIZED, is_port_present)?;

    SERIAL_PORTS.lock().configure();
    SERIAL_PORT_AVAILABLE.store(true, Ordering::Release);
    Ok(())
}

/// Set `flag` if `detect` finds the hardware
///
/// A failed detection clears the flag again so a later call may retry;
/// `detect` is not run when the flag is already set.
fn claim(flag: &AtomicBool, detect: impl FnOnce() -> bool) -> Result<(), SerialError> {
    if flag.swap(true, Ordering::AcqRel) {
        return Err(SerialError::AlreadyInitialized);
    }

    if !detect() {
        flag.store(false, Ordering::Release);
        return Err(SerialError::PortNotPresent);
    }
    Ok(())
}

fn is_port_present() -> bool {
    let mut ports = SERIAL_PORTS.lock();
    [SCRATCH_TEST_PRIMARY, SCRATCH_TEST_SECONDARY, 0x00]
        .into_iter()
        .all(|pattern| ports.scratch_roundtrip(pattern) == pattern)
}

#[inline]
pub fn is_initialized() -> bool {
    SERIAL_INITIALIZED.load(Ordering::Acquire)
}

#[inline]
pub fn is_available() -> bool {
    SERIAL_PORT_AVAILABLE.load(Ordering::Acquire)
}

/// Write a string to the serial port; a no-op until [`init`] succeeds
///
/// The port lock is held with interrupts disabled, so a handler that logs
/// cannot spin on a lock owned by the code it interrupted.
pub fn write_str(s: &str) {
    if !is_available() {
        return;
    }

    interrupts::without_interrupts(|| {
        let mut ports = SERIAL_PORTS.lock();
        for byte in s.bytes() {
            if !ports.poll_and_write(byte) {
                break;
            }
        }
    });
}

/// Serial writer implementing `core::fmt::Write`
#[derive(Debug)]
pub struct SerialWriter;

impl Write for SerialWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_str(s);
        Ok(())
    }
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments<'_>) {
    let _ = SerialWriter.write_fmt(args);
}

/// Serial print macro
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => ({
        $crate::serial::_print(format_args!($($arg)*));
    });
}

/// Serial println macro
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($fmt:expr) => ($crate::serial_print!(concat!($fmt, "\n")));
    ($fmt:expr, $($arg:tt)*) => ($crate::serial_print!(
        concat!($fmt, "\n"), $($arg)*
    ));
}
