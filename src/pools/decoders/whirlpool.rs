/// Orca Whirlpool decoder (ConcentratedLiquidity)
///
/// Based on the official Orca Whirlpool program structure from
/// https://github.com/orca-so/whirlpools/blob/main/programs/whirlpool/src/state/whirlpool.rs
///
/// Whirlpool uses a sqrt_price in Q64.64 format and a signed tick index.
/// There is no LP mint and no reserves in the pool account.
use super::{layout_for_version, match_layout, KnownLayout, LayoutDecoder, PoolNormalizer};
use crate::errors::DecodeError;
use crate::pools::types::{
    ConcentratedLiquidityState, LiquidityState, NormalizedPool, Protocol,
};
use crate::pools::utils::{
    ensure_initialized, read_bytes_at_offset, read_i32_at_offset, read_pubkey_at_offset,
    read_u128_at_offset, read_u16_at_offset, read_u64_at_offset, read_u8_at_offset,
    trailing_bytes, LayoutWriter,
};
use solana_sdk::pubkey::Pubkey;

/// Anchor account discriminator: sha256("account:Whirlpool")[..8]
pub const WHIRLPOOL_DISCRIMINATOR: [u8; 8] = [63, 149, 209, 12, 225, 128, 99, 9];

pub const WHIRLPOOL_LAYOUT_SIZE: usize = 653;

/// Three reward slots of 128 bytes each, preserved but not interpreted
pub const REWARD_INFOS_SIZE: usize = 384;

pub const WHIRLPOOL_LAYOUTS: &[KnownLayout] = &[KnownLayout {
    version: 1,
    discriminator: &WHIRLPOOL_DISCRIMINATOR,
    size: WHIRLPOOL_LAYOUT_SIZE,
}];

/// Fee rates are stored in hundredths of a basis point
const FEE_RATE_PER_BPS: u16 = 100;

/// Whirlpool account, field for field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhirlpoolPool {
    pub layout_version: u32,
    pub whirlpools_config: Pubkey,
    pub whirlpool_bump: u8,
    pub tick_spacing: u16,
    pub fee_tier_index_seed: [u8; 2],
    pub fee_rate: u16,
    pub protocol_fee_rate: u16,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub protocol_fee_owed_a: u64,
    pub protocol_fee_owed_b: u64,
    pub token_mint_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub fee_growth_global_a: u128,
    pub token_mint_b: Pubkey,
    pub token_vault_b: Pubkey,
    pub fee_growth_global_b: u128,
    pub reward_last_updated_timestamp: u64,
    pub reward_infos: [u8; REWARD_INFOS_SIZE],
    pub trailing: Vec<u8>,
}

impl WhirlpoolPool {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let layout = match_layout(data, WHIRLPOOL_LAYOUTS)?;
        let mut offset = layout.discriminator.len();

        let whirlpools_config = read_pubkey_at_offset(data, &mut offset)?;
        let whirlpool_bump = read_u8_at_offset(data, &mut offset)?;
        let tick_spacing = read_u16_at_offset(data, &mut offset)?;
        let fee_tier_index_seed = read_bytes_at_offset::<2>(data, &mut offset)?;
        let fee_rate = read_u16_at_offset(data, &mut offset)?;
        let protocol_fee_rate = read_u16_at_offset(data, &mut offset)?;
        let liquidity = read_u128_at_offset(data, &mut offset)?;
        let sqrt_price = read_u128_at_offset(data, &mut offset)?;
        let tick_current_index = read_i32_at_offset(data, &mut offset)?;
        let protocol_fee_owed_a = read_u64_at_offset(data, &mut offset)?;
        let protocol_fee_owed_b = read_u64_at_offset(data, &mut offset)?;
        let token_mint_a = read_pubkey_at_offset(data, &mut offset)?;
        let token_vault_a = read_pubkey_at_offset(data, &mut offset)?;
        let fee_growth_global_a = read_u128_at_offset(data, &mut offset)?;
        let token_mint_b = read_pubkey_at_offset(data, &mut offset)?;
        let token_vault_b = read_pubkey_at_offset(data, &mut offset)?;
        let fee_growth_global_b = read_u128_at_offset(data, &mut offset)?;
        let reward_last_updated_timestamp = read_u64_at_offset(data, &mut offset)?;
        let reward_infos = read_bytes_at_offset::<REWARD_INFOS_SIZE>(data, &mut offset)?;

        Ok(Self {
            layout_version: layout.version,
            whirlpools_config,
            whirlpool_bump,
            tick_spacing,
            fee_tier_index_seed,
            fee_rate,
            protocol_fee_rate,
            liquidity,
            sqrt_price,
            tick_current_index,
            protocol_fee_owed_a,
            protocol_fee_owed_b,
            token_mint_a,
            token_vault_a,
            fee_growth_global_a,
            token_mint_b,
            token_vault_b,
            fee_growth_global_b,
            reward_last_updated_timestamp,
            reward_infos,
            trailing: trailing_bytes(data, layout.size),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let discriminator = layout_for_version(WHIRLPOOL_LAYOUTS, self.layout_version)
            .map(|l| l.discriminator)
            .unwrap_or(&WHIRLPOOL_DISCRIMINATOR);

        let mut writer = LayoutWriter::with_capacity(WHIRLPOOL_LAYOUT_SIZE + self.trailing.len());
        writer
            .bytes(discriminator)
            .pubkey(&self.whirlpools_config)
            .u8(self.whirlpool_bump)
            .u16(self.tick_spacing)
            .bytes(&self.fee_tier_index_seed)
            .u16(self.fee_rate)
            .u16(self.protocol_fee_rate)
            .u128(self.liquidity)
            .u128(self.sqrt_price)
            .i32(self.tick_current_index)
            .u64(self.protocol_fee_owed_a)
            .u64(self.protocol_fee_owed_b)
            .pubkey(&self.token_mint_a)
            .pubkey(&self.token_vault_a)
            .u128(self.fee_growth_global_a)
            .pubkey(&self.token_mint_b)
            .pubkey(&self.token_vault_b)
            .u128(self.fee_growth_global_b)
            .u64(self.reward_last_updated_timestamp)
            .bytes(&self.reward_infos);
        debug_assert_eq!(writer.offset(), WHIRLPOOL_LAYOUT_SIZE);
        writer.bytes(&self.trailing);
        writer.finish()
    }
}

pub struct WhirlpoolDecoder;

impl LayoutDecoder for WhirlpoolDecoder {
    type Record = WhirlpoolPool;

    fn name(&self) -> &'static str {
        "orca-whirlpool"
    }

    fn decode(&self, data: &[u8]) -> Result<WhirlpoolPool, DecodeError> {
        WhirlpoolPool::decode(data)
    }
}

pub struct WhirlpoolNormalizer;

impl PoolNormalizer<WhirlpoolPool> for WhirlpoolNormalizer {
    fn protocol(&self) -> Protocol {
        Protocol::ConcentratedLiquidity
    }

    fn normalize(&self, pool: WhirlpoolPool) -> Result<NormalizedPool, DecodeError> {
        ensure_initialized("token_mint_a", &pool.token_mint_a)?;
        ensure_initialized("token_mint_b", &pool.token_mint_b)?;
        ensure_initialized("token_vault_a", &pool.token_vault_a)?;
        ensure_initialized("token_vault_b", &pool.token_vault_b)?;

        Ok(NormalizedPool {
            base_mint: pool.token_mint_a,
            quote_mint: pool.token_mint_b,
            base_vault: pool.token_vault_a,
            quote_vault: pool.token_vault_b,
            lp_mint: None,
            fee_bps: Some((pool.fee_rate / FEE_RATE_PER_BPS) as u32),
            liquidity_state: LiquidityState::ConcentratedLiquidity(ConcentratedLiquidityState {
                tick_current_index: pool.tick_current_index,
                tick_spacing: pool.tick_spacing,
                sqrt_price_x64: pool.sqrt_price,
                liquidity: pool.liquidity,
                fee_rate: pool.fee_rate,
                protocol_fee_rate: pool.protocol_fee_rate,
                config: pool.whirlpools_config,
            }),
            raw_layout_version: pool.layout_version,
        })
    }
}
