/// Configuration schemas - all config structures defined once with defaults
///
/// Each section is declared through `config_struct!`, so a missing key (or a
/// missing section) falls back to the default listed here.
use crate::config_struct;
use crate::pools::constants::BuiltinLayout;
use crate::pools::types::Protocol;
use serde::{Deserialize, Serialize};

// ============================================================================
// DECODER CONFIGURATION
// ============================================================================

/// Extra program id that shares a built-in layout (fork or redeployment)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramAlias {
    /// Base58 program id
    pub program_id: String,
    /// Built-in layout the program uses (token_swap, raydium_cpmm, whirlpool, pump_swap)
    pub layout: BuiltinLayout,
}

config_struct! {
    /// Which protocol families the registry is built with; a disabled family
    /// drops every built-in layout in it
    pub struct DecoderConfig {
        enable_standard_amm: bool = true,
        enable_concentrated_liquidity: bool = true,
        enable_third_party_amm: bool = true,

        /// Registered after the built-ins
        program_aliases: Vec<ProgramAlias> = Vec::new(),
    }
}

impl DecoderConfig {
    pub fn is_enabled(&self, protocol: Protocol) -> bool {
        match protocol {
            Protocol::StandardAmm => self.enable_standard_amm,
            Protocol::ConcentratedLiquidity => self.enable_concentrated_liquidity,
            Protocol::ThirdPartyAmm => self.enable_third_party_amm,
        }
    }
}

// ============================================================================
// LOGGING CONFIGURATION
// ============================================================================

config_struct! {
    pub struct LoggingConfig {
        /// error | warning | info | debug | verbose
        min_level: String = "info".to_string(),
        /// Debug keys of tags with debug output on (decoder, registry, config, system)
        debug_tags: Vec<String> = Vec::new(),
        /// When non-empty, only these tags log at info and warning
        enabled_tags: Vec<String> = Vec::new(),
        colors: bool = true,
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    pub struct Config {
        decoder: DecoderConfig = DecoderConfig::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}
