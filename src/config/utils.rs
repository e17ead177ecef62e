/// Configuration utilities - loading and access helpers
///
/// The decode core never reads configuration itself; binaries load it here
/// once and pass the relevant sections on (registry, logger).
use super::schemas::Config;
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::path::Path;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/pool_decoder.toml";

/// Parse a TOML document; `origin` only labels errors
pub fn parse_config_str(contents: &str, origin: &str) -> Result<Config, ConfigError> {
    toml::from_str::<Config>(contents).map_err(|source| ConfigError::Parse {
        path: origin.to_string(),
        source,
    })
}

/// Read a config file without touching the global instance
///
/// A missing file yields the defaults.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", display),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    let config = parse_config_str(&contents, &display)?;

    logger::debug(
        LogTag::Config,
        &format!(
            "Loaded '{}' ({} program aliases)",
            display,
            config.decoder.program_aliases.len()
        ),
    );
    Ok(config)
}

/// Load configuration from a specific file path into the global CONFIG
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let config = read_config_file(path)?;
    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// Run a closure with read access to the global configuration
///
/// # Example
/// ```
/// use pool_decoder::config::{load_config_from_path, with_config};
///
/// load_config_from_path("does/not/exist.toml").unwrap();
/// let aliases = with_config(|cfg| cfg.decoder.program_aliases.len()).unwrap();
/// assert_eq!(aliases, 0);
/// ```
pub fn with_config<F, R>(f: F) -> Result<R, ConfigError>
where
    F: FnOnce(&Config) -> R,
{
    let lock = CONFIG.get().ok_or(ConfigError::NotInitialized)?;
    let config = lock.read();
    Ok(f(&config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgramAlias;
    use crate::pools::constants::BuiltinLayout;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.decoder.enable_standard_amm);
        assert!(config.decoder.enable_concentrated_liquidity);
        assert!(config.decoder.enable_third_party_amm);
        assert!(config.decoder.program_aliases.is_empty());
        assert_eq!(config.logging.min_level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[decoder]"));
        assert!(toml_str.contains("[logging]"));
        assert_eq!(parse_config_str(&toml_str, "inline").unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[decoder]
enable_third_party_amm = false

[[decoder.program_aliases]]
program_id = "SwaPpA9LAaLfeLi3a68M4DjnLqgtticKg6CnyNwgAC8"
layout = "token_swap"
"#
        )
        .unwrap();

        let config = read_config_file(file.path()).unwrap();
        assert!(!config.decoder.enable_third_party_amm);
        assert!(config.decoder.enable_standard_amm);
        assert_eq!(
            config.decoder.program_aliases,
            vec![ProgramAlias {
                program_id: "SwaPpA9LAaLfeLi3a68M4DjnLqgtticKg6CnyNwgAC8".to_string(),
                layout: BuiltinLayout::TokenSwap,
            }]
        );
        assert_eq!(config.logging, crate::config::LoggingConfig::default());
    }

    // the only test that touches the global
    #[test]
    fn test_global_config_is_set_once() {
        let dir = tempfile::tempdir().unwrap();
        load_config_from_path(dir.path().join("absent.toml")).unwrap();

        let enabled = with_config(|cfg| cfg.decoder.enable_standard_amm).unwrap();
        assert!(enabled);
        assert!(matches!(
            load_config_from_path(dir.path().join("absent.toml")),
            Err(ConfigError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config_file(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[decoder]\nenable_standard_amm = \"yes\"").unwrap();

        let err = read_config_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let err = parse_config_str(
            "[[decoder.program_aliases]]\nprogram_id = \"x\"\nlayout = \"orderbook\"\n",
            "inline",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
