/// Logger configuration and global state
///
/// Held behind a process-wide lock so binaries can configure it once at
/// startup (from args or the config file) and library code just logs.
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::config::LoggingConfig;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Messages above this level are dropped
    pub min_level: LogLevel,
    /// Tags whose debug output is enabled (by debug key)
    pub debug_tags: HashSet<String>,
    /// Tags whose verbose output is enabled without a global `--verbose`
    pub verbose_tags: HashSet<String>,
    /// When non-empty, only these tags log at info/warning
    pub enabled_tags: HashSet<String>,
    /// ANSI colors on console output
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            colors: true,
        }
    }
}

impl LoggerConfig {
    /// Build from command-line style arguments
    ///
    /// Recognised: `--debug-<tag>`, `--verbose`, `--verbose-<tag>`, `--quiet`, `--no-color`.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            if arg == "--verbose" {
                config.min_level = LogLevel::Verbose;
            } else if arg == "--quiet" {
                config.min_level = LogLevel::Warning;
            } else if arg == "--no-color" {
                config.colors = false;
            } else if let Some(key) = arg.strip_prefix("--debug-") {
                config.enable_debug(key);
            } else if let Some(key) = arg.strip_prefix("--verbose-") {
                if let Some(tag) = LogTag::from_debug_key(key) {
                    config.verbose_tags.insert(tag.to_debug_key());
                    config.debug_tags.insert(tag.to_debug_key());
                    if config.min_level < LogLevel::Verbose {
                        config.min_level = LogLevel::Verbose;
                    }
                }
            }
        }
        config
    }

    /// Start from the `[logging]` section, then apply argument overrides
    ///
    /// Arguments only add to what the file enables, except `--quiet` and
    /// `--no-color`, which always win.
    pub fn from_settings<I, S>(settings: &LoggingConfig, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        if let Some(level) = LogLevel::from_str(&settings.min_level) {
            config.min_level = level;
        }
        for key in &settings.debug_tags {
            config.enable_debug(key);
        }
        config.enabled_tags = settings
            .enabled_tags
            .iter()
            .filter_map(|key| LogTag::from_debug_key(key))
            .map(|tag| tag.to_debug_key())
            .collect();
        config.colors = settings.colors;

        let overrides = Self::from_args(args);
        if overrides.min_level > config.min_level || overrides.min_level == LogLevel::Warning {
            config.min_level = overrides.min_level;
        }
        config.debug_tags.extend(overrides.debug_tags);
        config.verbose_tags.extend(overrides.verbose_tags);
        config.colors &= overrides.colors;
        config
    }

    /// Enable debug output for a tag; raises the threshold to Debug if needed
    pub fn enable_debug(&mut self, key: &str) {
        if let Some(tag) = LogTag::from_debug_key(key) {
            self.debug_tags.insert(tag.to_debug_key());
            if self.min_level < LogLevel::Debug {
                self.min_level = LogLevel::Debug;
            }
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

pub(super) fn with_logger_config<R>(f: impl FnOnce(&LoggerConfig) -> R) -> R {
    f(&LOGGER_CONFIG.read())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_debug_off() {
        let config = LoggerConfig::default();
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.debug_tags.is_empty());
    }

    #[test]
    fn test_from_args_enables_tag_debug() {
        let config = LoggerConfig::from_args(["decode", "--debug-decoder", "--debug-bogus", "--no-color"]);
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.debug_tags.contains("decoder"));
        assert_eq!(config.debug_tags.len(), 1);
        assert!(!config.colors);
    }

    #[test]
    fn test_verbose_tag_implies_debug() {
        let config = LoggerConfig::from_args(["--verbose-registry"]);
        assert_eq!(config.min_level, LogLevel::Verbose);
        assert!(config.verbose_tags.contains("registry"));
        assert!(config.debug_tags.contains("registry"));
    }

    #[test]
    fn test_quiet_raises_threshold() {
        let config = LoggerConfig::from_args(["--quiet"]);
        assert_eq!(config.min_level, LogLevel::Warning);
    }

    #[test]
    fn test_settings_merge_with_args() {
        let settings = LoggingConfig {
            min_level: "debug".to_string(),
            debug_tags: vec!["config".to_string()],
            enabled_tags: vec!["System".to_string(), "nonsense".to_string()],
            colors: true,
        };

        let config = LoggerConfig::from_settings(&settings, ["--debug-registry", "--no-color"]);
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.debug_tags.contains("config"));
        assert!(config.debug_tags.contains("registry"));
        assert_eq!(config.enabled_tags.len(), 1);
        assert!(config.enabled_tags.contains("system"));
        assert!(!config.colors);

        let config = LoggerConfig::from_settings(&settings, ["--verbose"]);
        assert_eq!(config.min_level, LogLevel::Verbose);

        // args never lower a file level, only --quiet does
        let config = LoggerConfig::from_settings(&settings, Vec::<String>::new());
        assert_eq!(config.min_level, LogLevel::Debug);
        let config = LoggerConfig::from_settings(&settings, ["--quiet"]);
        assert_eq!(config.min_level, LogLevel::Warning);
    }
}
