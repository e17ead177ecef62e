//! Multi-protocol decoder for Solana liquidity pool accounts
//!
//! ```ignore
//! use pool_decoder::pools;
//!
//! let pool = pools::parse(&program_id, &account.data)?;
//! println!("{} fee={:?}bps", pool.protocol(), pool.fee_bps());
//! ```

pub mod config;
pub mod errors;
pub mod logger;
pub mod pools;

pub use errors::{ConfigError, DecodeError, ParseError, RegistrationError};
pub use pools::{parse, parse_account, parse_batch, Protocol, UnifiedPool};
