/// Core types for the pools module
///
/// `UnifiedPool` is the single shape handed back to callers regardless of which
/// program owned the account. Everything protocol specific lives in
/// `LiquidityState`, whose variant always matches the pool's `Protocol`.
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::pubkey::Pubkey;
use std::fmt;

/// Closed set of protocol families the decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Constant-product AMM with its mints and vaults inline (SPL token-swap, Raydium CPMM)
    StandardAmm,
    /// Tick-based concentrated liquidity AMM (Whirlpool layout)
    ConcentratedLiquidity,
    /// Third-party constant-product AMM (PumpSwap layout)
    ThirdPartyAmm,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [
        Protocol::StandardAmm,
        Protocol::ConcentratedLiquidity,
        Protocol::ThirdPartyAmm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::StandardAmm => "standard_amm",
            Protocol::ConcentratedLiquidity => "concentrated_liquidity",
            Protocol::ThirdPartyAmm => "third_party_amm",
        }
    }

    /// Parse from the snake_case tag (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard_amm" => Some(Protocol::StandardAmm),
            "concentrated_liquidity" => Some(Protocol::ConcentratedLiquidity),
            "third_party_amm" => Some(Protocol::ThirdPartyAmm),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fee expressed as an on-chain numerator/denominator pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeFraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl FeeFraction {
    /// Fee in basis points, rounded down. A zero denominator means no fee.
    pub fn bps(&self) -> u128 {
        if self.denominator == 0 {
            return 0;
        }
        (self.numerator as u128) * 10_000 / (self.denominator as u128)
    }
}

/// Inline fee and curve configuration of an SPL token-swap pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSwapState {
    pub trade_fee: FeeFraction,
    pub owner_trade_fee: FeeFraction,
    pub owner_withdraw_fee: FeeFraction,
    pub host_fee: FeeFraction,
    /// 0 = constant product, 1 = constant price, 2 = stable, 3 = offset
    pub curve_type: u8,
    pub curve_parameters: [u8; 32],
}

/// Raydium CPMM pool fields; the fee tiers live in the `amm_config` account
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaydiumCpmmState {
    #[serde_as(as = "DisplayFromStr")]
    pub amm_config: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub pool_creator: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub observation_key: Pubkey,
    /// Bit 0 disables deposits, bit 1 withdrawals, bit 2 swaps
    pub status: u8,
    pub lp_supply: u64,
    pub mint_0_decimals: u8,
    pub mint_1_decimals: u8,
    pub protocol_fees_token_0: u64,
    pub protocol_fees_token_1: u64,
    pub fund_fees_token_0: u64,
    pub fund_fees_token_1: u64,
    pub open_time: u64,
}

/// Extra fields of a StandardAmm pool, by on-chain layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum StandardAmmState {
    TokenSwap(TokenSwapState),
    RaydiumCpmm(RaydiumCpmmState),
}

impl StandardAmmState {
    pub fn as_token_swap(&self) -> Option<&TokenSwapState> {
        match self {
            StandardAmmState::TokenSwap(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_raydium_cpmm(&self) -> Option<&RaydiumCpmmState> {
        match self {
            StandardAmmState::RaydiumCpmm(state) => Some(state),
            _ => None,
        }
    }
}

/// Extra fields of a concentrated liquidity pool
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcentratedLiquidityState {
    pub tick_current_index: i32,
    pub tick_spacing: u16,
    /// Square root of the price as Q64.64 fixed point
    #[serde_as(as = "DisplayFromStr")]
    pub sqrt_price_x64: u128,
    #[serde_as(as = "DisplayFromStr")]
    pub liquidity: u128,
    /// Native fee rate in hundredths of a basis point
    pub fee_rate: u16,
    /// Protocol share of the fee, in basis points of the fee
    pub protocol_fee_rate: u16,
    #[serde_as(as = "DisplayFromStr")]
    pub config: Pubkey,
}

/// Extra fields of a third-party AMM (PumpSwap) pool
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyAmmState {
    pub pool_index: u16,
    #[serde_as(as = "DisplayFromStr")]
    pub creator: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub coin_creator: Pubkey,
    pub lp_supply: u64,
}

/// Protocol specific state; the variant always matches the pool's protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LiquidityState {
    StandardAmm(StandardAmmState),
    ConcentratedLiquidity(ConcentratedLiquidityState),
    ThirdPartyAmm(ThirdPartyAmmState),
}

impl LiquidityState {
    pub fn protocol(&self) -> Protocol {
        match self {
            LiquidityState::StandardAmm(_) => Protocol::StandardAmm,
            LiquidityState::ConcentratedLiquidity(_) => Protocol::ConcentratedLiquidity,
            LiquidityState::ThirdPartyAmm(_) => Protocol::ThirdPartyAmm,
        }
    }

    pub fn as_concentrated(&self) -> Option<&ConcentratedLiquidityState> {
        match self {
            LiquidityState::ConcentratedLiquidity(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_standard(&self) -> Option<&StandardAmmState> {
        match self {
            LiquidityState::StandardAmm(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_third_party(&self) -> Option<&ThirdPartyAmmState> {
        match self {
            LiquidityState::ThirdPartyAmm(state) => Some(state),
            _ => None,
        }
    }
}

/// Where an account came from; supplied by the caller, never decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolContext {
    pub program_id: Pubkey,
    pub pool_address: Option<Pubkey>,
}

impl PoolContext {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            pool_address: None,
        }
    }

    pub fn with_address(program_id: Pubkey, pool_address: Pubkey) -> Self {
        Self {
            program_id,
            pool_address: Some(pool_address),
        }
    }
}

/// Output of a normalizer, before the dispatcher attaches account context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPool {
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub lp_mint: Option<Pubkey>,
    pub fee_bps: Option<u32>,
    pub liquidity_state: LiquidityState,
    pub raw_layout_version: u32,
}

/// Protocol independent view of a decoded pool account
///
/// Built once per decode call and never mutated afterwards; the fields are
/// private so `protocol` can only ever be derived from `liquidity_state`.
/// Deserialization goes through `UnifiedPoolRepr` and rejects JSON whose
/// `protocol` disagrees with the `liquidity_state` tag.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UnifiedPoolRepr")]
pub struct UnifiedPool {
    #[serde_as(as = "Option<DisplayFromStr>")]
    pool_address: Option<Pubkey>,
    protocol: Protocol,
    #[serde_as(as = "DisplayFromStr")]
    program_id: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    base_mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    quote_mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    base_vault: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    quote_vault: Pubkey,
    #[serde_as(as = "Option<DisplayFromStr>")]
    lp_mint: Option<Pubkey>,
    fee_bps: Option<u32>,
    liquidity_state: LiquidityState,
    raw_layout_version: u32,
}

/// Wire form of `UnifiedPool`, checked before it becomes one
#[serde_as]
#[derive(Deserialize)]
struct UnifiedPoolRepr {
    #[serde_as(as = "Option<DisplayFromStr>")]
    pool_address: Option<Pubkey>,
    protocol: Protocol,
    #[serde_as(as = "DisplayFromStr")]
    program_id: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    base_mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    quote_mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    base_vault: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    quote_vault: Pubkey,
    #[serde_as(as = "Option<DisplayFromStr>")]
    lp_mint: Option<Pubkey>,
    fee_bps: Option<u32>,
    liquidity_state: LiquidityState,
    raw_layout_version: u32,
}

impl TryFrom<UnifiedPoolRepr> for UnifiedPool {
    type Error = String;

    fn try_from(repr: UnifiedPoolRepr) -> Result<Self, Self::Error> {
        let produced = repr.liquidity_state.protocol();
        if repr.protocol != produced {
            return Err(format!(
                "protocol '{}' does not match liquidity_state kind '{}'",
                repr.protocol, produced
            ));
        }
        Ok(Self {
            pool_address: repr.pool_address,
            protocol: repr.protocol,
            program_id: repr.program_id,
            base_mint: repr.base_mint,
            quote_mint: repr.quote_mint,
            base_vault: repr.base_vault,
            quote_vault: repr.quote_vault,
            lp_mint: repr.lp_mint,
            fee_bps: repr.fee_bps,
            liquidity_state: repr.liquidity_state,
            raw_layout_version: repr.raw_layout_version,
        })
    }
}

impl UnifiedPool {
    pub fn new(context: &PoolContext, normalized: NormalizedPool) -> Self {
        Self {
            pool_address: context.pool_address,
            protocol: normalized.liquidity_state.protocol(),
            program_id: context.program_id,
            base_mint: normalized.base_mint,
            quote_mint: normalized.quote_mint,
            base_vault: normalized.base_vault,
            quote_vault: normalized.quote_vault,
            lp_mint: normalized.lp_mint,
            fee_bps: normalized.fee_bps,
            liquidity_state: normalized.liquidity_state,
            raw_layout_version: normalized.raw_layout_version,
        }
    }

    pub fn pool_address(&self) -> Option<Pubkey> {
        self.pool_address
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn base_mint(&self) -> Pubkey {
        self.base_mint
    }

    pub fn quote_mint(&self) -> Pubkey {
        self.quote_mint
    }

    pub fn base_vault(&self) -> Pubkey {
        self.base_vault
    }

    pub fn quote_vault(&self) -> Pubkey {
        self.quote_vault
    }

    pub fn lp_mint(&self) -> Option<Pubkey> {
        self.lp_mint
    }

    /// Total swap fee in whole basis points, rounded down
    ///
    /// `None` when the pool account does not carry its fee (PumpSwap, Raydium
    /// CPMM). Concentrated liquidity pools store hundredths of a basis point,
    /// so tiers below 1 bp report `Some(0)`; the exact rate stays available as
    /// `ConcentratedLiquidityState::fee_rate`.
    pub fn fee_bps(&self) -> Option<u32> {
        self.fee_bps
    }

    pub fn liquidity_state(&self) -> &LiquidityState {
        &self.liquidity_state
    }

    pub fn raw_layout_version(&self) -> u32 {
        self.raw_layout_version
    }
}
