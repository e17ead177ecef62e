/// Pool account dispatcher
///
/// Routes raw account bytes to the decoder registered for the owning program
/// and returns a `UnifiedPool`. Dispatch is stateless: the same input always
/// yields the same output, and calls from many threads never interfere.
use crate::errors::ParseError;
use crate::logger::{self, LogTag};
use crate::pools::registry::{self, ProtocolRegistry};
use crate::pools::types::{PoolContext, UnifiedPool};
use rayon::prelude::*;
use solana_sdk::pubkey::Pubkey;

/// One raw account handed to `parse_batch`
#[derive(Debug, Clone, Copy)]
pub struct AccountInput<'a> {
    pub pool_address: Option<Pubkey>,
    pub program_id: Pubkey,
    pub data: &'a [u8],
}

impl<'a> AccountInput<'a> {
    pub fn new(program_id: Pubkey, data: &'a [u8]) -> Self {
        Self {
            pool_address: None,
            program_id,
            data,
        }
    }

    pub fn with_address(pool_address: Pubkey, program_id: Pubkey, data: &'a [u8]) -> Self {
        Self {
            pool_address: Some(pool_address),
            program_id,
            data,
        }
    }

    fn context(&self) -> PoolContext {
        PoolContext {
            program_id: self.program_id,
            pool_address: self.pool_address,
        }
    }
}

/// Decode a pool account owned by `program_id` using the process-wide registry
pub fn parse(program_id: &Pubkey, data: &[u8]) -> Result<UnifiedPool, ParseError> {
    parse_account(None, program_id, data)
}

/// Same as `parse`, carrying the account address into the result
pub fn parse_account(
    pool_address: Option<Pubkey>,
    program_id: &Pubkey,
    data: &[u8],
) -> Result<UnifiedPool, ParseError> {
    let context = PoolContext {
        program_id: *program_id,
        pool_address,
    };
    // resolve clones the handler out, the lock is released before decoding
    let result = registry::resolve(program_id).and_then(|entry| entry.parse(&context, data));
    log_failure(&context, data.len(), &result);
    result
}

/// Decode against an explicit registry instance
pub fn parse_with(
    registry: &ProtocolRegistry,
    program_id: &Pubkey,
    data: &[u8],
) -> Result<UnifiedPool, ParseError> {
    let context = PoolContext::new(*program_id);
    parse_context_with(registry, &context, data)
}

fn parse_context_with(
    registry: &ProtocolRegistry,
    context: &PoolContext,
    data: &[u8],
) -> Result<UnifiedPool, ParseError> {
    let result = registry
        .resolve(&context.program_id)
        .and_then(|entry| entry.parse(context, data));
    log_failure(context, data.len(), &result);
    result
}

/// Decode many accounts in parallel; results keep input order
pub fn parse_batch(inputs: &[AccountInput<'_>]) -> Vec<Result<UnifiedPool, ParseError>> {
    let registry = registry::snapshot();
    parse_batch_with(&registry, inputs)
}

pub fn parse_batch_with(
    registry: &ProtocolRegistry,
    inputs: &[AccountInput<'_>],
) -> Vec<Result<UnifiedPool, ParseError>> {
    let results: Vec<Result<UnifiedPool, ParseError>> = inputs
        .par_iter()
        .map(|input| parse_context_with(registry, &input.context(), input.data))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        logger::debug(
            LogTag::Decoder,
            &format!("Batch decode: {}/{} accounts failed", failed, results.len()),
        );
    }
    results
}

fn log_failure(context: &PoolContext, len: usize, result: &Result<UnifiedPool, ParseError>) {
    if let Err(e) = result {
        if !logger::is_debug_enabled(LogTag::Decoder) {
            return;
        }
        let address = context
            .pool_address
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        logger::debug(
            LogTag::Decoder,
            &format!("Failed to decode {} ({} bytes): {}", address, len, e),
        );
    }
}
