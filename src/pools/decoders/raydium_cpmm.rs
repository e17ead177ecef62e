/// Raydium CPMM decoder (StandardAmm)
///
/// Constant-product pools of the Raydium CP-Swap program. Mints, vaults and the
/// LP mint are inline; the fee tiers live in the separate `amm_config`
/// account, so the pool account carries no swap fee of its own.
///
/// Layout (637 bytes):
/// discriminator(8) + amm_config(32) + pool_creator(32) + token_0_vault(32) +
/// token_1_vault(32) + lp_mint(32) + token_0_mint(32) + token_1_mint(32) +
/// token_0_program(32) + token_1_program(32) + observation_key(32) + auth_bump(1) +
/// status(1) + lp_mint_decimals(1) + mint_0_decimals(1) + mint_1_decimals(1) +
/// lp_supply(8) + protocol_fees_token_0/1(16) + fund_fees_token_0/1(16) +
/// open_time(8) + recent_epoch(8) + padding(31 x u64)
use super::{layout_for_version, match_layout, KnownLayout, LayoutDecoder, PoolNormalizer};
use crate::errors::DecodeError;
use crate::pools::types::{
    LiquidityState, NormalizedPool, Protocol, RaydiumCpmmState, StandardAmmState,
};
use crate::pools::utils::{
    ensure_initialized, read_bytes_at_offset, read_pubkey_at_offset, read_u64_at_offset,
    read_u8_at_offset, trailing_bytes, LayoutWriter,
};
use solana_sdk::pubkey::Pubkey;

/// Anchor account discriminator: sha256("account:PoolState")[..8]
pub const POOL_STATE_DISCRIMINATOR: [u8; 8] = [247, 237, 227, 245, 215, 195, 222, 70];

pub const RAYDIUM_CPMM_LAYOUT_SIZE: usize = 637;

const PADDING_SIZE: usize = 31 * 8;

pub const RAYDIUM_CPMM_LAYOUTS: &[KnownLayout] = &[KnownLayout {
    version: 1,
    discriminator: &POOL_STATE_DISCRIMINATOR,
    size: RAYDIUM_CPMM_LAYOUT_SIZE,
}];

/// Raydium CPMM `PoolState` account, field for field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaydiumCpmmPool {
    pub layout_version: u32,
    pub amm_config: Pubkey,
    pub pool_creator: Pubkey,
    pub token_0_vault: Pubkey,
    pub token_1_vault: Pubkey,
    pub lp_mint: Pubkey,
    pub token_0_mint: Pubkey,
    pub token_1_mint: Pubkey,
    pub token_0_program: Pubkey,
    pub token_1_program: Pubkey,
    pub observation_key: Pubkey,
    pub auth_bump: u8,
    pub status: u8,
    pub lp_mint_decimals: u8,
    pub mint_0_decimals: u8,
    pub mint_1_decimals: u8,
    pub lp_supply: u64,
    pub protocol_fees_token_0: u64,
    pub protocol_fees_token_1: u64,
    pub fund_fees_token_0: u64,
    pub fund_fees_token_1: u64,
    pub open_time: u64,
    pub recent_epoch: u64,
    /// Reserved words; newer program versions carve fields out of this region
    pub padding: [u8; PADDING_SIZE],
    pub trailing: Vec<u8>,
}

impl RaydiumCpmmPool {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let layout = match_layout(data, RAYDIUM_CPMM_LAYOUTS)?;
        let mut offset = layout.discriminator.len();

        let amm_config = read_pubkey_at_offset(data, &mut offset)?;
        let pool_creator = read_pubkey_at_offset(data, &mut offset)?;
        let token_0_vault = read_pubkey_at_offset(data, &mut offset)?;
        let token_1_vault = read_pubkey_at_offset(data, &mut offset)?;
        let lp_mint = read_pubkey_at_offset(data, &mut offset)?;
        let token_0_mint = read_pubkey_at_offset(data, &mut offset)?;
        let token_1_mint = read_pubkey_at_offset(data, &mut offset)?;
        let token_0_program = read_pubkey_at_offset(data, &mut offset)?;
        let token_1_program = read_pubkey_at_offset(data, &mut offset)?;
        let observation_key = read_pubkey_at_offset(data, &mut offset)?;

        let auth_bump = read_u8_at_offset(data, &mut offset)?;
        let status = read_u8_at_offset(data, &mut offset)?;
        let lp_mint_decimals = read_u8_at_offset(data, &mut offset)?;
        let mint_0_decimals = read_u8_at_offset(data, &mut offset)?;
        let mint_1_decimals = read_u8_at_offset(data, &mut offset)?;

        let lp_supply = read_u64_at_offset(data, &mut offset)?;
        let protocol_fees_token_0 = read_u64_at_offset(data, &mut offset)?;
        let protocol_fees_token_1 = read_u64_at_offset(data, &mut offset)?;
        let fund_fees_token_0 = read_u64_at_offset(data, &mut offset)?;
        let fund_fees_token_1 = read_u64_at_offset(data, &mut offset)?;
        let open_time = read_u64_at_offset(data, &mut offset)?;
        let recent_epoch = read_u64_at_offset(data, &mut offset)?;
        let padding = read_bytes_at_offset::<PADDING_SIZE>(data, &mut offset)?;

        Ok(Self {
            layout_version: layout.version,
            amm_config,
            pool_creator,
            token_0_vault,
            token_1_vault,
            lp_mint,
            token_0_mint,
            token_1_mint,
            token_0_program,
            token_1_program,
            observation_key,
            auth_bump,
            status,
            lp_mint_decimals,
            mint_0_decimals,
            mint_1_decimals,
            lp_supply,
            protocol_fees_token_0,
            protocol_fees_token_1,
            fund_fees_token_0,
            fund_fees_token_1,
            open_time,
            recent_epoch,
            padding,
            trailing: trailing_bytes(data, layout.size),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let discriminator = layout_for_version(RAYDIUM_CPMM_LAYOUTS, self.layout_version)
            .map(|l| l.discriminator)
            .unwrap_or(&POOL_STATE_DISCRIMINATOR);

        let mut writer =
            LayoutWriter::with_capacity(RAYDIUM_CPMM_LAYOUT_SIZE + self.trailing.len());
        writer
            .bytes(discriminator)
            .pubkey(&self.amm_config)
            .pubkey(&self.pool_creator)
            .pubkey(&self.token_0_vault)
            .pubkey(&self.token_1_vault)
            .pubkey(&self.lp_mint)
            .pubkey(&self.token_0_mint)
            .pubkey(&self.token_1_mint)
            .pubkey(&self.token_0_program)
            .pubkey(&self.token_1_program)
            .pubkey(&self.observation_key)
            .u8(self.auth_bump)
            .u8(self.status)
            .u8(self.lp_mint_decimals)
            .u8(self.mint_0_decimals)
            .u8(self.mint_1_decimals)
            .u64(self.lp_supply)
            .u64(self.protocol_fees_token_0)
            .u64(self.protocol_fees_token_1)
            .u64(self.fund_fees_token_0)
            .u64(self.fund_fees_token_1)
            .u64(self.open_time)
            .u64(self.recent_epoch)
            .bytes(&self.padding);
        debug_assert_eq!(writer.offset(), RAYDIUM_CPMM_LAYOUT_SIZE);
        writer.bytes(&self.trailing);
        writer.finish()
    }
}

pub struct RaydiumCpmmDecoder;

impl LayoutDecoder for RaydiumCpmmDecoder {
    type Record = RaydiumCpmmPool;

    fn name(&self) -> &'static str {
        "raydium-cpmm"
    }

    fn decode(&self, data: &[u8]) -> Result<RaydiumCpmmPool, DecodeError> {
        RaydiumCpmmPool::decode(data)
    }
}

pub struct RaydiumCpmmNormalizer;

impl PoolNormalizer<RaydiumCpmmPool> for RaydiumCpmmNormalizer {
    fn protocol(&self) -> Protocol {
        Protocol::StandardAmm
    }

    fn normalize(&self, pool: RaydiumCpmmPool) -> Result<NormalizedPool, DecodeError> {
        ensure_initialized("token_0_mint", &pool.token_0_mint)?;
        ensure_initialized("token_1_mint", &pool.token_1_mint)?;
        ensure_initialized("token_0_vault", &pool.token_0_vault)?;
        ensure_initialized("token_1_vault", &pool.token_1_vault)?;
        ensure_initialized("lp_mint", &pool.lp_mint)?;

        Ok(NormalizedPool {
            base_mint: pool.token_0_mint,
            quote_mint: pool.token_1_mint,
            base_vault: pool.token_0_vault,
            quote_vault: pool.token_1_vault,
            lp_mint: Some(pool.lp_mint),
            fee_bps: None,
            liquidity_state: LiquidityState::StandardAmm(StandardAmmState::RaydiumCpmm(
                RaydiumCpmmState {
                    amm_config: pool.amm_config,
                    pool_creator: pool.pool_creator,
                    observation_key: pool.observation_key,
                    status: pool.status,
                    lp_supply: pool.lp_supply,
                    mint_0_decimals: pool.mint_0_decimals,
                    mint_1_decimals: pool.mint_1_decimals,
                    protocol_fees_token_0: pool.protocol_fees_token_0,
                    protocol_fees_token_1: pool.protocol_fees_token_1,
                    fund_fees_token_0: pool.fund_fees_token_0,
                    fund_fees_token_1: pool.fund_fees_token_1,
                    open_time: pool.open_time,
                },
            )),
            raw_layout_version: pool.layout_version,
        })
    }
}
