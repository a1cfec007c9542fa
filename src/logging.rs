// src/logging.rs

//! `log` backend that writes to COM1

use crate::serial;

/// Level installed by [`init`] when the caller has no preference
pub const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Info;

/// Logger forwarding `[LEVEL] message` lines to the serial port
#[derive(Debug)]
pub struct SerialLogger;

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            serial::_print(format_args!("[{}] {}\n", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: SerialLogger = SerialLogger;

/// Install the serial logger as the global `log` backend
pub fn init(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_enabled_follows_max_level() {
        let metadata = log::Metadata::builder().level(log::Level::Trace).build();
        log::set_max_level(log::LevelFilter::Info);
        assert!(!SerialLogger.enabled(&metadata));

        log::set_max_level(log::LevelFilter::Trace);
        assert!(SerialLogger.enabled(&metadata));
    }
}
