/// PumpSwap AMM decoder (ThirdPartyAmm)
///
/// PumpSwap AMM structure:
/// discriminator(8) + pool_bump(1) + index(2) + creator(32) + base_mint(32) + quote_mint(32) +
/// lp_mint(32) + pool_base_token_account(32) + pool_quote_token_account(32) + lp_supply(8) +
/// coin_creator(32)
///
/// Live accounts are larger than the 243 byte layout; newer flags and reserved
/// space are kept as trailing bytes. Fees are configured globally, not per pool.
use super::{layout_for_version, match_layout, KnownLayout, LayoutDecoder, PoolNormalizer};
use crate::errors::DecodeError;
use crate::pools::types::{LiquidityState, NormalizedPool, Protocol, ThirdPartyAmmState};
use crate::pools::utils::{
    ensure_initialized, read_pubkey_at_offset, read_u16_at_offset, read_u64_at_offset,
    read_u8_at_offset, trailing_bytes, LayoutWriter,
};
use solana_sdk::pubkey::Pubkey;

/// Anchor account discriminator: sha256("account:Pool")[..8]
pub const POOL_DISCRIMINATOR: [u8; 8] = [241, 154, 109, 4, 17, 177, 109, 188];

pub const PUMP_SWAP_LAYOUT_SIZE: usize = 243;

pub const PUMP_SWAP_LAYOUTS: &[KnownLayout] = &[KnownLayout {
    version: 1,
    discriminator: &POOL_DISCRIMINATOR,
    size: PUMP_SWAP_LAYOUT_SIZE,
}];

/// PumpSwap pool account, field for field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PumpSwapPool {
    pub layout_version: u32,
    pub pool_bump: u8,
    pub index: u16,
    pub creator: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub pool_base_token_account: Pubkey,
    pub pool_quote_token_account: Pubkey,
    pub lp_supply: u64,
    pub coin_creator: Pubkey,
    pub trailing: Vec<u8>,
}

impl PumpSwapPool {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let layout = match_layout(data, PUMP_SWAP_LAYOUTS)?;
        let mut offset = layout.discriminator.len();

        let pool_bump = read_u8_at_offset(data, &mut offset)?;
        let index = read_u16_at_offset(data, &mut offset)?;
        let creator = read_pubkey_at_offset(data, &mut offset)?;
        let base_mint = read_pubkey_at_offset(data, &mut offset)?;
        let quote_mint = read_pubkey_at_offset(data, &mut offset)?;
        let lp_mint = read_pubkey_at_offset(data, &mut offset)?;
        let pool_base_token_account = read_pubkey_at_offset(data, &mut offset)?;
        let pool_quote_token_account = read_pubkey_at_offset(data, &mut offset)?;
        let lp_supply = read_u64_at_offset(data, &mut offset)?;
        let coin_creator = read_pubkey_at_offset(data, &mut offset)?;

        Ok(Self {
            layout_version: layout.version,
            pool_bump,
            index,
            creator,
            base_mint,
            quote_mint,
            lp_mint,
            pool_base_token_account,
            pool_quote_token_account,
            lp_supply,
            coin_creator,
            trailing: trailing_bytes(data, layout.size),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let discriminator = layout_for_version(PUMP_SWAP_LAYOUTS, self.layout_version)
            .map(|l| l.discriminator)
            .unwrap_or(&POOL_DISCRIMINATOR);

        let mut writer = LayoutWriter::with_capacity(PUMP_SWAP_LAYOUT_SIZE + self.trailing.len());
        writer
            .bytes(discriminator)
            .u8(self.pool_bump)
            .u16(self.index)
            .pubkey(&self.creator)
            .pubkey(&self.base_mint)
            .pubkey(&self.quote_mint)
            .pubkey(&self.lp_mint)
            .pubkey(&self.pool_base_token_account)
            .pubkey(&self.pool_quote_token_account)
            .u64(self.lp_supply)
            .pubkey(&self.coin_creator);
        debug_assert_eq!(writer.offset(), PUMP_SWAP_LAYOUT_SIZE);
        writer.bytes(&self.trailing);
        writer.finish()
    }
}

pub struct PumpSwapDecoder;

impl LayoutDecoder for PumpSwapDecoder {
    type Record = PumpSwapPool;

    fn name(&self) -> &'static str {
        "pump-swap"
    }

    fn decode(&self, data: &[u8]) -> Result<PumpSwapPool, DecodeError> {
        PumpSwapPool::decode(data)
    }
}

pub struct PumpSwapNormalizer;

impl PoolNormalizer<PumpSwapPool> for PumpSwapNormalizer {
    fn protocol(&self) -> Protocol {
        Protocol::ThirdPartyAmm
    }

    fn normalize(&self, pool: PumpSwapPool) -> Result<NormalizedPool, DecodeError> {
        ensure_initialized("base_mint", &pool.base_mint)?;
        ensure_initialized("quote_mint", &pool.quote_mint)?;
        ensure_initialized("pool_base_token_account", &pool.pool_base_token_account)?;
        ensure_initialized("pool_quote_token_account", &pool.pool_quote_token_account)?;
        ensure_initialized("lp_mint", &pool.lp_mint)?;

        Ok(NormalizedPool {
            base_mint: pool.base_mint,
            quote_mint: pool.quote_mint,
            base_vault: pool.pool_base_token_account,
            quote_vault: pool.pool_quote_token_account,
            lp_mint: Some(pool.lp_mint),
            fee_bps: None,
            liquidity_state: LiquidityState::ThirdPartyAmm(ThirdPartyAmmState {
                pool_index: pool.index,
                creator: pool.creator,
                coin_creator: pool.coin_creator,
                lp_supply: pool.lp_supply,
            }),
            raw_layout_version: pool.layout_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::decoders::fixtures::{key, PumpSwapFixture, TokenSwapFixture};

    #[test]
    fn test_decode_fixture_fields() {
        let fixture = PumpSwapFixture::default();
        let pool = PumpSwapPool::decode(&fixture.bytes()).unwrap();

        assert_eq!(pool.pool_bump, 253);
        assert_eq!(pool.index, 0);
        assert_eq!(pool.creator, key(0xC1));
        assert_eq!(pool.base_mint, key(0xA1));
        assert_eq!(pool.quote_mint, key(0xB1));
        assert_eq!(pool.lp_mint, key(0x1F));
        assert_eq!(pool.pool_base_token_account, key(0xA2));
        assert_eq!(pool.pool_quote_token_account, key(0xB2));
        assert_eq!(pool.lp_supply, 4_193_388_468_324);
        assert_eq!(pool.coin_creator, key(0xC2));
        assert_eq!(pool.trailing.len(), 57);
    }

    #[test]
    fn test_normalize_has_no_inline_fee() {
        let pool = PumpSwapPool::decode(&PumpSwapFixture::default().bytes()).unwrap();
        let normalized = PumpSwapNormalizer.normalize(pool).unwrap();

        assert_eq!(normalized.fee_bps, None);
        assert_eq!(normalized.lp_mint, Some(key(0x1F)));
        assert_eq!(normalized.base_vault, key(0xA2));
        let state = normalized.liquidity_state.as_third_party().unwrap();
        assert_eq!(state.lp_supply, 4_193_388_468_324);
        assert_eq!(state.coin_creator, key(0xC2));
    }

    #[test]
    fn test_encode_reproduces_account() {
        let bytes = PumpSwapFixture::default().bytes();
        let pool = PumpSwapPool::decode(&bytes).unwrap();
        assert_eq!(pool.encode(), bytes);
    }

    #[test]
    fn test_accepts_exact_layout_without_trailing() {
        let fixture = PumpSwapFixture {
            trailing: Vec::new(),
            ..Default::default()
        };
        let bytes = fixture.bytes();
        assert_eq!(bytes.len(), PUMP_SWAP_LAYOUT_SIZE);
        assert!(PumpSwapPool::decode(&bytes).unwrap().trailing.is_empty());
    }

    #[test]
    fn test_does_not_accept_token_swap_bytes() {
        // 324 bytes is long enough, but the first byte is a token-swap version, not our discriminator
        let bytes = TokenSwapFixture::default().bytes();
        assert!(matches!(
            PumpSwapPool::decode(&bytes),
            Err(DecodeError::UnknownLayoutVersion { .. })
        ));
    }

    #[test]
    fn test_zero_lp_mint_is_uninitialized() {
        let fixture = PumpSwapFixture {
            lp_mint: Pubkey::default(),
            ..Default::default()
        };
        let pool = PumpSwapPool::decode(&fixture.bytes()).unwrap();
        assert_eq!(
            PumpSwapNormalizer.normalize(pool),
            Err(DecodeError::UninitializedPool { field: "lp_mint" })
        );
    }
}
