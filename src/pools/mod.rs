/// Pool Account Decoding
///
/// Turns raw account bytes owned by a supported AMM program into a single
/// `UnifiedPool` shape. Supports multiple protocol layouts behind one
/// `parse` entry point; new programs can be registered at runtime.

pub mod constants;
pub mod decoders;
pub mod dispatcher;
pub mod registry;
pub mod types;
pub mod utils;

// Re-export main components
pub use constants::*;
pub use dispatcher::{parse, parse_account, parse_batch, parse_batch_with, parse_with, AccountInput};
pub use registry::{ProtocolRegistry, RegisteredProtocol};
pub use types::{
    ConcentratedLiquidityState, FeeFraction, LiquidityState, NormalizedPool, PoolContext,
    Protocol, RaydiumCpmmState, StandardAmmState, ThirdPartyAmmState, TokenSwapState,
    UnifiedPool,
};
