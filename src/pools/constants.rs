/// Program identifiers of the built-in protocols
use crate::pools::types::Protocol;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

/// Orca Token Swap V2, a deployment of the SPL token-swap program
pub const TOKEN_SWAP_PROGRAM_ID: Pubkey = pubkey!("9W959DqEETiGZocYWCQPaJ6sBmUzgfxXfqGeTEdp3aQP");

/// Raydium CP-Swap (CPMM)
pub const RAYDIUM_CPMM_PROGRAM_ID: Pubkey = pubkey!("CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C");

/// Orca Whirlpools
pub const WHIRLPOOL_PROGRAM_ID: Pubkey = pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

/// PumpSwap AMM
pub const PUMP_SWAP_PROGRAM_ID: Pubkey = pubkey!("pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA");

/// Account layouts with a built-in decoder
///
/// Several layouts can share a protocol family; program aliases name the
/// layout, not the family, so a fork is always decoded the way its parent is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinLayout {
    TokenSwap,
    RaydiumCpmm,
    Whirlpool,
    PumpSwap,
}

impl BuiltinLayout {
    pub const ALL: [BuiltinLayout; 4] = [
        BuiltinLayout::TokenSwap,
        BuiltinLayout::RaydiumCpmm,
        BuiltinLayout::Whirlpool,
        BuiltinLayout::PumpSwap,
    ];

    /// Program id the layout is registered under at startup
    pub fn program_id(self) -> Pubkey {
        match self {
            BuiltinLayout::TokenSwap => TOKEN_SWAP_PROGRAM_ID,
            BuiltinLayout::RaydiumCpmm => RAYDIUM_CPMM_PROGRAM_ID,
            BuiltinLayout::Whirlpool => WHIRLPOOL_PROGRAM_ID,
            BuiltinLayout::PumpSwap => PUMP_SWAP_PROGRAM_ID,
        }
    }

    pub fn protocol(self) -> Protocol {
        match self {
            BuiltinLayout::TokenSwap | BuiltinLayout::RaydiumCpmm => Protocol::StandardAmm,
            BuiltinLayout::Whirlpool => Protocol::ConcentratedLiquidity,
            BuiltinLayout::PumpSwap => Protocol::ThirdPartyAmm,
        }
    }
}
