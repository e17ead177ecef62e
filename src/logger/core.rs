/// Core logging implementation with automatic filtering
///
/// Decides whether a message is shown based on level and tag, then hands
/// it to the format module.

use super::config::{with_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Filtering rules:
/// 1. Errors are always shown
/// 2. Anything above the minimum level is dropped
/// 3. Debug requires debug mode for that tag
/// 4. Verbose requires global verbose or verbose mode for that tag
/// 5. If enabled_tags is non-empty, the tag must be in the set
pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    let key = tag.to_debug_key();

    if level == LogLevel::Debug {
        return config.debug_tags.contains(&key);
    }

    if level == LogLevel::Verbose {
        return config.verbose_tags.is_empty() || config.verbose_tags.contains(&key);
    }

    config.enabled_tags.is_empty() || config.enabled_tags.contains(&key)
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let colors = match with_logger_config(|config| {
        should_log(config, &tag, level).then_some(config.colors)
    }) {
        Some(colors) => colors,
        None => return,
    };

    super::format::format_and_log(tag, level, message, colors);
}
