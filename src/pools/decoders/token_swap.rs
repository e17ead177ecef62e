/// SPL token-swap decoder (StandardAmm)
///
/// Constant-product pools on the SPL token-swap layout. Fees are stored inline
/// as numerator/denominator pairs; reserves are held in the two vaults and
/// are not part of the pool account.
///
/// Layout (324 bytes):
/// version(1) + is_initialized(1) + bump_seed(1) + token_program_id(32) +
/// token_a(32) + token_b(32) + pool_mint(32) + token_a_mint(32) + token_b_mint(32) +
/// pool_fee_account(32) + fees(8 x u64) + curve_type(1) + curve_parameters(32)
use super::{layout_for_version, match_layout, KnownLayout, LayoutDecoder, PoolNormalizer};
use crate::errors::DecodeError;
use crate::pools::types::{
    FeeFraction, LiquidityState, NormalizedPool, Protocol, StandardAmmState, TokenSwapState,
};
use crate::pools::utils::{
    ensure_initialized, read_bytes_at_offset, read_pubkey_at_offset, read_u64_at_offset,
    read_u8_at_offset, trailing_bytes, LayoutWriter,
};
use solana_sdk::pubkey::Pubkey;

pub const TOKEN_SWAP_LAYOUT_SIZE: usize = 324;

/// The first byte is the swap version; only `SwapV1` exists on chain
pub const TOKEN_SWAP_LAYOUTS: &[KnownLayout] = &[KnownLayout {
    version: 1,
    discriminator: &[1],
    size: TOKEN_SWAP_LAYOUT_SIZE,
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSwapFees {
    pub trade_fee: FeeFraction,
    pub owner_trade_fee: FeeFraction,
    pub owner_withdraw_fee: FeeFraction,
    /// Share of the owner trade fee paid to a host, not an extra charge
    pub host_fee: FeeFraction,
}

impl TokenSwapFees {
    /// Fee charged on a swap: trade fee plus owner trade fee
    pub fn swap_fee_bps(&self) -> u32 {
        let total = self.trade_fee.bps() + self.owner_trade_fee.bps();
        u32::try_from(total).unwrap_or(u32::MAX)
    }
}

/// Token-swap pool account, field for field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSwapPool {
    pub layout_version: u32,
    pub is_initialized: u8,
    pub bump_seed: u8,
    pub token_program_id: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub pool_mint: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub pool_fee_account: Pubkey,
    pub fees: TokenSwapFees,
    pub curve_type: u8,
    pub curve_parameters: [u8; 32],
    pub trailing: Vec<u8>,
}

fn read_fee(data: &[u8], offset: &mut usize) -> Result<FeeFraction, DecodeError> {
    Ok(FeeFraction {
        numerator: read_u64_at_offset(data, offset)?,
        denominator: read_u64_at_offset(data, offset)?,
    })
}

impl TokenSwapPool {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let layout = match_layout(data, TOKEN_SWAP_LAYOUTS)?;
        let mut offset = layout.discriminator.len();

        let is_initialized = read_u8_at_offset(data, &mut offset)?;
        let bump_seed = read_u8_at_offset(data, &mut offset)?;
        let token_program_id = read_pubkey_at_offset(data, &mut offset)?;
        let token_a = read_pubkey_at_offset(data, &mut offset)?;
        let token_b = read_pubkey_at_offset(data, &mut offset)?;
        let pool_mint = read_pubkey_at_offset(data, &mut offset)?;
        let token_a_mint = read_pubkey_at_offset(data, &mut offset)?;
        let token_b_mint = read_pubkey_at_offset(data, &mut offset)?;
        let pool_fee_account = read_pubkey_at_offset(data, &mut offset)?;

        let fees = TokenSwapFees {
            trade_fee: read_fee(data, &mut offset)?,
            owner_trade_fee: read_fee(data, &mut offset)?,
            owner_withdraw_fee: read_fee(data, &mut offset)?,
            host_fee: read_fee(data, &mut offset)?,
        };

        let curve_type = read_u8_at_offset(data, &mut offset)?;
        let curve_parameters = read_bytes_at_offset::<32>(data, &mut offset)?;

        Ok(Self {
            layout_version: layout.version,
            is_initialized,
            bump_seed,
            token_program_id,
            token_a,
            token_b,
            pool_mint,
            token_a_mint,
            token_b_mint,
            pool_fee_account,
            fees,
            curve_type,
            curve_parameters,
            trailing: trailing_bytes(data, layout.size),
        })
    }

    /// Write the account back out at the offsets `decode` reads from
    pub fn encode(&self) -> Vec<u8> {
        let discriminator = layout_for_version(TOKEN_SWAP_LAYOUTS, self.layout_version)
            .map(|l| l.discriminator)
            .unwrap_or(&[1]);

        let mut writer = LayoutWriter::with_capacity(TOKEN_SWAP_LAYOUT_SIZE + self.trailing.len());
        writer
            .bytes(discriminator)
            .u8(self.is_initialized)
            .u8(self.bump_seed)
            .pubkey(&self.token_program_id)
            .pubkey(&self.token_a)
            .pubkey(&self.token_b)
            .pubkey(&self.pool_mint)
            .pubkey(&self.token_a_mint)
            .pubkey(&self.token_b_mint)
            .pubkey(&self.pool_fee_account);
        for fee in [
            self.fees.trade_fee,
            self.fees.owner_trade_fee,
            self.fees.owner_withdraw_fee,
            self.fees.host_fee,
        ] {
            writer.u64(fee.numerator).u64(fee.denominator);
        }
        writer.u8(self.curve_type).bytes(&self.curve_parameters);
        debug_assert_eq!(writer.offset(), TOKEN_SWAP_LAYOUT_SIZE);
        writer.bytes(&self.trailing);
        writer.finish()
    }
}

pub struct TokenSwapDecoder;

impl LayoutDecoder for TokenSwapDecoder {
    type Record = TokenSwapPool;

    fn name(&self) -> &'static str {
        "spl-token-swap"
    }

    fn decode(&self, data: &[u8]) -> Result<TokenSwapPool, DecodeError> {
        TokenSwapPool::decode(data)
    }
}

pub struct TokenSwapNormalizer;

impl PoolNormalizer<TokenSwapPool> for TokenSwapNormalizer {
    fn protocol(&self) -> Protocol {
        Protocol::StandardAmm
    }

    fn normalize(&self, pool: TokenSwapPool) -> Result<NormalizedPool, DecodeError> {
        if pool.is_initialized == 0 {
            return Err(DecodeError::UninitializedPool {
                field: "is_initialized",
            });
        }
        ensure_initialized("token_a_mint", &pool.token_a_mint)?;
        ensure_initialized("token_b_mint", &pool.token_b_mint)?;
        ensure_initialized("token_a", &pool.token_a)?;
        ensure_initialized("token_b", &pool.token_b)?;
        ensure_initialized("pool_mint", &pool.pool_mint)?;

        Ok(NormalizedPool {
            base_mint: pool.token_a_mint,
            quote_mint: pool.token_b_mint,
            base_vault: pool.token_a,
            quote_vault: pool.token_b,
            lp_mint: Some(pool.pool_mint),
            fee_bps: Some(pool.fees.swap_fee_bps()),
            liquidity_state: LiquidityState::StandardAmm(StandardAmmState::TokenSwap(
                TokenSwapState {
                    trade_fee: pool.fees.trade_fee,
                    owner_trade_fee: pool.fees.owner_trade_fee,
                    owner_withdraw_fee: pool.fees.owner_withdraw_fee,
                    host_fee: pool.fees.host_fee,
                    curve_type: pool.curve_type,
                    curve_parameters: pool.curve_parameters,
                },
            )),
            raw_layout_version: pool.layout_version,
        })
    }
}
