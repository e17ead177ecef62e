/// Pool decoders for the supported protocol layouts
///
/// A protocol is supported through a pair: a `LayoutDecoder` that turns raw
/// account bytes into the protocol's own record, and a `PoolNormalizer` that
/// maps that record onto the unified model. The registry stores the pair
/// type-erased, so the dispatcher never needs to know the record types.
pub mod pump_swap;
pub mod raydium_cpmm;
pub mod token_swap;
pub mod whirlpool;

use crate::errors::{Discriminator, DecodeError};
use crate::pools::types::{NormalizedPool, Protocol};

pub use pump_swap::{PumpSwapDecoder, PumpSwapNormalizer, PumpSwapPool};
pub use raydium_cpmm::{RaydiumCpmmDecoder, RaydiumCpmmNormalizer, RaydiumCpmmPool};
pub use token_swap::{TokenSwapDecoder, TokenSwapNormalizer, TokenSwapPool};
pub use whirlpool::{WhirlpoolDecoder, WhirlpoolNormalizer, WhirlpoolPool};

/// Decodes raw account bytes into a protocol specific record
///
/// Implementations must be pure: no I/O, no shared mutable state.
pub trait LayoutDecoder: Send + Sync + 'static {
    type Record: Send + 'static;

    /// Human readable identifier for logs and conflict messages
    fn name(&self) -> &'static str;

    fn decode(&self, data: &[u8]) -> Result<Self::Record, DecodeError>;
}

/// Maps a decoded record onto the unified pool model
///
/// Must be total over records its decoder produces; the only allowed failure
/// is `UninitializedPool`.
pub trait PoolNormalizer<R>: Send + Sync + 'static {
    fn protocol(&self) -> Protocol;

    fn normalize(&self, record: R) -> Result<NormalizedPool, DecodeError>;
}

/// One accepted on-chain layout within a protocol family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownLayout {
    pub version: u32,
    pub discriminator: &'static [u8],
    /// Minimum account size for this version
    pub size: usize,
}

/// Pick the layout version for an account
///
/// Order of checks: shorter than every known layout is `TruncatedAccount`;
/// an all-zero discriminator is `UninitializedPool`; any other unmatched
/// discriminator is `UnknownLayoutVersion`; finally the matched version's own
/// size is enforced. There is no fallback layout.
pub fn match_layout<'a>(
    data: &[u8],
    layouts: &'a [KnownLayout],
) -> Result<&'a KnownLayout, DecodeError> {
    let min_size = layouts.iter().map(|l| l.size).min().unwrap_or(0);
    if data.len() < min_size {
        return Err(DecodeError::TruncatedAccount {
            expected: min_size,
            actual: data.len(),
        });
    }

    let layout = layouts
        .iter()
        .find(|l| data.starts_with(l.discriminator))
        .ok_or_else(|| {
            let width = layouts.first().map(|l| l.discriminator.len()).unwrap_or(0);
            let discriminator = Discriminator::from_slice(&data[..width.min(data.len())]);
            if discriminator.is_zeroed() {
                DecodeError::UninitializedPool {
                    field: "discriminator",
                }
            } else {
                DecodeError::UnknownLayoutVersion { discriminator }
            }
        })?;

    if data.len() < layout.size {
        return Err(DecodeError::TruncatedAccount {
            expected: layout.size,
            actual: data.len(),
        });
    }

    Ok(layout)
}

/// Look up the layout for a version number when encoding
pub fn layout_for_version(layouts: &[KnownLayout], version: u32) -> Option<&KnownLayout> {
    layouts.iter().find(|l| l.version == version)
}

#[cfg(test)]
pub(crate) mod fixtures;
