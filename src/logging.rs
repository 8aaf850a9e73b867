use log::{Level, SetLoggerError};

/// Installs a logger that writes to the browser console, with the given
/// maximum level.
///
/// Fails if another logger is already installed.
pub fn init(level: Level) -> Result<(), SetLoggerError> {
    console_log::init_with_level(level)
}
