// src/errors.rs

//! Error types for the driver
//!
//! All errors are `Copy` and carry static messages so they can be reported
//! without an allocator.

use core::fmt;

/// Top-level driver error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// VGA subsystem error
    Vga(VgaError),
    /// Serial subsystem error
    Serial(SerialError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Vga(e) => write!(f, "VGA error: {}", e),
            DriverError::Serial(e) => write!(f, "Serial error: {}", e),
        }
    }
}

/// VGA subsystem errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VgaError {
    /// Buffer not accessible
    BufferNotAccessible,
    /// Cell index outside the buffer
    InvalidPosition,
    /// Sequence longer than the buffer capacity
    BufferOverflow,
}

impl VgaError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VgaError::BufferNotAccessible => "buffer not accessible",
            VgaError::InvalidPosition => "invalid position",
            VgaError::BufferOverflow => "buffer overflow",
        }
    }
}

impl fmt::Display for VgaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VgaError> for DriverError {
    fn from(err: VgaError) -> Self {
        DriverError::Vga(err)
    }
}

/// Serial subsystem errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// Port already initialized
    AlreadyInitialized,
    /// Hardware not present
    PortNotPresent,
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::AlreadyInitialized => write!(f, "already initialized"),
            SerialError::PortNotPresent => write!(f, "hardware not present"),
        }
    }
}

impl From<SerialError> for DriverError {
    fn from(err: SerialError) -> Self {
        DriverError::Serial(err)
    }
}

/// Result type alias
pub type Result<T> = core::result::Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: DriverError = VgaError::BufferOverflow.into();
        assert_eq!(err, DriverError::Vga(VgaError::BufferOverflow));

        let err: DriverError = SerialError::PortNotPresent.into();
        assert_eq!(err, DriverError::Serial(SerialError::PortNotPresent));
    }

    #[test]
    fn test_error_display() {
        let err = DriverError::Vga(VgaError::BufferOverflow);
        assert_eq!(format!("{}", err), "VGA error: buffer overflow");
        assert_eq!(
            format!("{}", DriverError::Serial(SerialError::AlreadyInitialized)),
            "Serial error: already initialized"
        );
    }
}
