//! Structured logging for the pool decoder
//!
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via `--debug-<tag>` flags or `logging.debug_tags`
//! - Colored console output on stderr
//!
//! ## Usage
//!
//! ```rust
//! use pool_decoder::logger::{self, LogTag};
//!
//! logger::error(LogTag::Config, "Failed to parse config");
//! logger::info(LogTag::System, "Decoded 3 pools");
//! logger::debug(LogTag::Decoder, "Layout v1 matched"); // Only if --debug-decoder
//! ```
//!
//! Library code only logs; binaries call `logger::init_from_settings()` once
//! at startup with the `[logging]` section and their logger flags.

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

use crate::config::LoggingConfig;

/// Initialize from the `[logging]` config section, then apply logger flags
///
/// `args` are flags in command-line form: `--verbose`, `--quiet`,
/// `--no-color`, `--debug-<tag>`, `--verbose-<tag>`.
pub fn init_from_settings<I, S>(settings: &LoggingConfig, args: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    set_logger_config(LoggerConfig::from_settings(settings, args));
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when debug is enabled for the tag, e.g. `--debug-decoder`.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (`--verbose` or `--verbose-<tag>`)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// True when debug output for `tag` would be shown
///
/// Lets callers skip building expensive messages.
pub fn is_debug_enabled(tag: LogTag) -> bool {
    config::with_logger_config(|c| core::should_log(c, &tag, LogLevel::Debug))
}
