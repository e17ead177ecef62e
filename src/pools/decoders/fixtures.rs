//! Hand-assembled account images for tests
//!
//! Fields are written at absolute offsets rather than through the record
//! encoders, so decoder offsets are checked against an independent source.

use super::pump_swap::POOL_DISCRIMINATOR;
use super::raydium_cpmm::POOL_STATE_DISCRIMINATOR;
use super::whirlpool::WHIRLPOOL_DISCRIMINATOR;
use solana_sdk::pubkey::Pubkey;

pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
}

pub struct TokenSwapFixture {
    pub version: u8,
    pub is_initialized: u8,
    pub token_program: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub pool_mint: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub fee_account: Pubkey,
    /// trade, owner trade, owner withdraw, host
    pub fees: [(u64, u64); 4],
    pub curve_type: u8,
}

impl Default for TokenSwapFixture {
    fn default() -> Self {
        Self {
            version: 1,
            is_initialized: 1,
            token_program: key(0x06),
            token_a_vault: key(0xA2),
            token_b_vault: key(0xB2),
            pool_mint: key(0x1F),
            token_a_mint: key(0xA1),
            token_b_mint: key(0xB1),
            fee_account: key(0xFE),
            fees: [(20, 10_000), (5, 10_000), (0, 0), (20, 100)],
            curve_type: 0,
        }
    }
}

impl TokenSwapFixture {
    pub fn bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 324];
        buf[0] = self.version;
        buf[1] = self.is_initialized;
        buf[2] = 254;
        put(&mut buf, 3, self.token_program.as_ref());
        put(&mut buf, 35, self.token_a_vault.as_ref());
        put(&mut buf, 67, self.token_b_vault.as_ref());
        put(&mut buf, 99, self.pool_mint.as_ref());
        put(&mut buf, 131, self.token_a_mint.as_ref());
        put(&mut buf, 163, self.token_b_mint.as_ref());
        put(&mut buf, 195, self.fee_account.as_ref());
        for (i, (num, den)) in self.fees.iter().enumerate() {
            put(&mut buf, 227 + i * 16, &num.to_le_bytes());
            put(&mut buf, 235 + i * 16, &den.to_le_bytes());
        }
        buf[291] = self.curve_type;
        buf
    }
}

pub struct WhirlpoolFixture {
    pub config: Pubkey,
    pub tick_spacing: u16,
    pub fee_rate: u16,
    pub protocol_fee_rate: u16,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub token_mint_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub token_vault_b: Pubkey,
}

impl Default for WhirlpoolFixture {
    fn default() -> Self {
        Self {
            config: key(0xC0),
            tick_spacing: 10,
            fee_rate: 3000,
            protocol_fee_rate: 1300,
            liquidity: 987_654_321_000,
            // sqrt(1.0) in Q64.64
            sqrt_price: 1u128 << 64,
            tick_current_index: -120,
            token_mint_a: key(0xA1),
            token_vault_a: key(0xA2),
            token_mint_b: key(0xB1),
            token_vault_b: key(0xB2),
        }
    }
}

impl WhirlpoolFixture {
    pub fn bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 653];
        put(&mut buf, 0, &WHIRLPOOL_DISCRIMINATOR);
        put(&mut buf, 8, self.config.as_ref());
        buf[40] = 255;
        put(&mut buf, 41, &self.tick_spacing.to_le_bytes());
        put(&mut buf, 43, &self.tick_spacing.to_le_bytes());
        put(&mut buf, 45, &self.fee_rate.to_le_bytes());
        put(&mut buf, 47, &self.protocol_fee_rate.to_le_bytes());
        put(&mut buf, 49, &self.liquidity.to_le_bytes());
        put(&mut buf, 65, &self.sqrt_price.to_le_bytes());
        put(&mut buf, 81, &self.tick_current_index.to_le_bytes());
        put(&mut buf, 85, &11u64.to_le_bytes());
        put(&mut buf, 93, &22u64.to_le_bytes());
        put(&mut buf, 101, self.token_mint_a.as_ref());
        put(&mut buf, 133, self.token_vault_a.as_ref());
        put(&mut buf, 165, &7u128.to_le_bytes());
        put(&mut buf, 181, self.token_mint_b.as_ref());
        put(&mut buf, 213, self.token_vault_b.as_ref());
        put(&mut buf, 245, &9u128.to_le_bytes());
        put(&mut buf, 261, &1_700_000_000u64.to_le_bytes());
        // first reward slot: mint, then a recognisable pattern through the rest
        put(&mut buf, 269, key(0x77).as_ref());
        for (i, byte) in buf[301..653].iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }
        buf
    }
}

pub struct PumpSwapFixture {
    pub index: u16,
    pub creator: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub base_account: Pubkey,
    pub quote_account: Pubkey,
    pub lp_supply: u64,
    pub coin_creator: Pubkey,
    /// Newer flags and reserved space past the fixed layout
    pub trailing: Vec<u8>,
}

impl Default for PumpSwapFixture {
    fn default() -> Self {
        Self {
            index: 0,
            creator: key(0xC1),
            base_mint: key(0xA1),
            quote_mint: key(0xB1),
            lp_mint: key(0x1F),
            base_account: key(0xA2),
            quote_account: key(0xB2),
            lp_supply: 4_193_388_468_324,
            coin_creator: key(0xC2),
            trailing: {
                let mut reserved = vec![0u8; 57];
                reserved[0] = 1;
                reserved
            },
        }
    }
}

impl PumpSwapFixture {
    pub fn bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 243];
        put(&mut buf, 0, &POOL_DISCRIMINATOR);
        buf[8] = 253;
        put(&mut buf, 9, &self.index.to_le_bytes());
        put(&mut buf, 11, self.creator.as_ref());
        put(&mut buf, 43, self.base_mint.as_ref());
        put(&mut buf, 75, self.quote_mint.as_ref());
        put(&mut buf, 107, self.lp_mint.as_ref());
        put(&mut buf, 139, self.base_account.as_ref());
        put(&mut buf, 171, self.quote_account.as_ref());
        put(&mut buf, 203, &self.lp_supply.to_le_bytes());
        put(&mut buf, 211, self.coin_creator.as_ref());
        buf.extend_from_slice(&self.trailing);
        buf
    }
}

pub struct RaydiumCpmmFixture {
    pub amm_config: Pubkey,
    pub pool_creator: Pubkey,
    pub token_0_vault: Pubkey,
    pub token_1_vault: Pubkey,
    pub lp_mint: Pubkey,
    pub token_0_mint: Pubkey,
    pub token_1_mint: Pubkey,
    pub status: u8,
    pub lp_supply: u64,
}

impl Default for RaydiumCpmmFixture {
    fn default() -> Self {
        Self {
            amm_config: key(0xC0),
            pool_creator: key(0xC1),
            token_0_vault: key(0xA2),
            token_1_vault: key(0xB2),
            lp_mint: key(0x1F),
            token_0_mint: key(0xA1),
            token_1_mint: key(0xB1),
            status: 0,
            lp_supply: 74_161_438_191,
        }
    }
}

impl RaydiumCpmmFixture {
    pub fn bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 637];
        put(&mut buf, 0, &POOL_STATE_DISCRIMINATOR);
        put(&mut buf, 8, self.amm_config.as_ref());
        put(&mut buf, 40, self.pool_creator.as_ref());
        put(&mut buf, 72, self.token_0_vault.as_ref());
        put(&mut buf, 104, self.token_1_vault.as_ref());
        put(&mut buf, 136, self.lp_mint.as_ref());
        put(&mut buf, 168, self.token_0_mint.as_ref());
        put(&mut buf, 200, self.token_1_mint.as_ref());
        put(&mut buf, 232, key(0x06).as_ref());
        put(&mut buf, 264, key(0x07).as_ref());
        put(&mut buf, 296, key(0x0B).as_ref());
        buf[328] = 252;
        buf[329] = self.status;
        buf[330] = 9;
        buf[331] = 9;
        buf[332] = 6;
        put(&mut buf, 333, &self.lp_supply.to_le_bytes());
        put(&mut buf, 341, &101u64.to_le_bytes());
        put(&mut buf, 349, &202u64.to_le_bytes());
        put(&mut buf, 357, &303u64.to_le_bytes());
        put(&mut buf, 365, &404u64.to_le_bytes());
        put(&mut buf, 373, &1_700_000_000u64.to_le_bytes());
        put(&mut buf, 381, &612u64.to_le_bytes());
        buf
    }
}
