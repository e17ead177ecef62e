/// Configuration for the decoder binaries
///
/// One TOML file, two sections: `[decoder]` selects the protocols and
/// program aliases the registry is built with, `[logging]` seeds the logger.

#[macro_use]
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, DecoderConfig, LoggingConfig, ProgramAlias};
pub use utils::{
    load_config_from_path, parse_config_str, read_config_file, with_config, CONFIG,
    CONFIG_FILE_PATH,
};
