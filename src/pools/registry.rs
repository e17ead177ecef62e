/// Protocol registry: program id -> (decoder, normalizer)
///
/// Built-in protocols and runtime additions go through the same insertion
/// path. An entry is identified by the concrete decoder and normalizer types
/// it was built from; names are only used in logs and error messages. The
/// process-wide registry sits behind a read-mostly lock; handlers are `Arc`s
/// cloned out of it, so no lock is held while bytes are decoded.
use crate::config::DecoderConfig;
use crate::errors::{ConfigError, DecodeError, ParseError, RegistrationError};
use crate::logger::{self, LogTag};
use crate::pools::constants::BuiltinLayout;
use crate::pools::decoders::{
    LayoutDecoder, PoolNormalizer, PumpSwapDecoder, PumpSwapNormalizer, RaydiumCpmmDecoder,
    RaydiumCpmmNormalizer, TokenSwapDecoder, TokenSwapNormalizer, WhirlpoolDecoder,
    WhirlpoolNormalizer,
};
use crate::pools::types::{NormalizedPool, PoolContext, Protocol, UnifiedPool};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use solana_sdk::pubkey::Pubkey;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Type-erased decoder + normalizer pair
trait PoolHandler: Send + Sync {
    fn decode_and_normalize(&self, data: &[u8]) -> Result<NormalizedPool, DecodeError>;
}

struct Pipeline<D, N> {
    decoder: D,
    normalizer: N,
}

impl<D, N> PoolHandler for Pipeline<D, N>
where
    D: LayoutDecoder,
    N: PoolNormalizer<D::Record>,
{
    fn decode_and_normalize(&self, data: &[u8]) -> Result<NormalizedPool, DecodeError> {
        let record = self.decoder.decode(data)?;
        self.normalizer.normalize(record)
    }
}

/// A resolved registry entry
#[derive(Clone)]
pub struct RegisteredProtocol {
    program_id: Pubkey,
    protocol: Protocol,
    decoder_name: &'static str,
    normalizer_name: &'static str,
    /// `TypeId` of `Pipeline<D, N>`; two entries are the same handler iff these match
    handler_type: TypeId,
    handler: Arc<dyn PoolHandler>,
}

impl RegisteredProtocol {
    fn new<D, N>(program_id: Pubkey, decoder: D, normalizer: N) -> Self
    where
        D: LayoutDecoder,
        N: PoolNormalizer<D::Record>,
    {
        Self {
            program_id,
            protocol: normalizer.protocol(),
            decoder_name: decoder.name(),
            normalizer_name: type_name::<N>(),
            handler_type: TypeId::of::<Pipeline<D, N>>(),
            handler: Arc::new(Pipeline {
                decoder,
                normalizer,
            }),
        }
    }

    fn builtin(program_id: Pubkey, layout: BuiltinLayout) -> Self {
        match layout {
            BuiltinLayout::TokenSwap => Self::new(program_id, TokenSwapDecoder, TokenSwapNormalizer),
            BuiltinLayout::RaydiumCpmm => {
                Self::new(program_id, RaydiumCpmmDecoder, RaydiumCpmmNormalizer)
            }
            BuiltinLayout::Whirlpool => Self::new(program_id, WhirlpoolDecoder, WhirlpoolNormalizer),
            BuiltinLayout::PumpSwap => Self::new(program_id, PumpSwapDecoder, PumpSwapNormalizer),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn decoder_name(&self) -> &'static str {
        self.decoder_name
    }

    /// Run decoder then normalizer, attaching protocol and program context to failures
    pub fn parse(&self, context: &PoolContext, data: &[u8]) -> Result<UnifiedPool, ParseError> {
        let normalized =
            self.handler
                .decode_and_normalize(data)
                .map_err(|source| ParseError::Decode {
                    protocol: self.protocol,
                    program_id: context.program_id,
                    source,
                })?;

        let produced = normalized.liquidity_state.protocol();
        if produced != self.protocol {
            return Err(ParseError::ProtocolMismatch {
                program_id: context.program_id,
                registered: self.protocol,
                produced,
            });
        }

        Ok(UnifiedPool::new(context, normalized))
    }
}

impl std::fmt::Debug for RegisteredProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredProtocol")
            .field("program_id", &self.program_id)
            .field("protocol", &self.protocol)
            .field("decoder_name", &self.decoder_name)
            .field("normalizer", &self.normalizer_name)
            .finish()
    }
}

/// Program id -> protocol handler mapping
#[derive(Clone, Default)]
pub struct ProtocolRegistry {
    entries: HashMap<Pubkey, RegisteredProtocol>,
}

impl ProtocolRegistry {
    /// Empty registry, no protocols supported
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in layout under its canonical program id
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for layout in BuiltinLayout::ALL {
            registry.insert(RegisteredProtocol::builtin(layout.program_id(), layout));
        }
        registry
    }

    /// Registry built from the `[decoder]` config section
    ///
    /// Enabled built-ins first, then program aliases, which go through the
    /// normal conflict check.
    pub fn from_config(config: &DecoderConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for layout in BuiltinLayout::ALL {
            if config.is_enabled(layout.protocol()) {
                registry.insert(RegisteredProtocol::builtin(layout.program_id(), layout));
            } else {
                logger::debug(
                    LogTag::Registry,
                    &format!("{:?} disabled by config ({})", layout, layout.protocol()),
                );
            }
        }

        for alias in &config.program_aliases {
            let program_id =
                Pubkey::from_str(alias.program_id.trim()).map_err(|_| ConfigError::InvalidProgramId {
                    value: alias.program_id.clone(),
                })?;
            registry.register_builtin_layout(program_id, alias.layout)?;
        }

        Ok(registry)
    }

    fn insert(&mut self, entry: RegisteredProtocol) {
        logger::debug(
            LogTag::Registry,
            &format!(
                "Registered {} for {} ({})",
                entry.decoder_name, entry.program_id, entry.protocol
            ),
        );
        self.entries.insert(entry.program_id, entry);
    }

    fn check_and_insert(&mut self, entry: RegisteredProtocol) -> Result<(), RegistrationError> {
        if let Some(existing) = self.entries.get(&entry.program_id) {
            if existing.handler_type == entry.handler_type && existing.protocol == entry.protocol {
                return Ok(());
            }
            logger::error(
                LogTag::Registry,
                &format!(
                    "Refusing '{}' + {} for {}: already handled by '{}' + {}",
                    entry.decoder_name,
                    entry.normalizer_name,
                    entry.program_id,
                    existing.decoder_name,
                    existing.normalizer_name
                ),
            );
            return Err(RegistrationError::Conflict {
                program_id: entry.program_id,
                existing: existing.decoder_name,
                existing_protocol: existing.protocol,
                attempted: entry.decoder_name,
                attempted_protocol: entry.protocol,
            });
        }
        self.insert(entry);
        Ok(())
    }

    /// Register a decoder/normalizer pair for a program id
    ///
    /// Registering the same decoder and normalizer types again is a no-op; any
    /// other pair for an id that is already taken, even one that differs only
    /// in its normalizer, is a `RegistrationError::Conflict`.
    pub fn register<D, N>(
        &mut self,
        program_id: Pubkey,
        decoder: D,
        normalizer: N,
    ) -> Result<(), RegistrationError>
    where
        D: LayoutDecoder,
        N: PoolNormalizer<D::Record>,
    {
        self.check_and_insert(RegisteredProtocol::new(program_id, decoder, normalizer))
    }

    /// Register an additional program id that shares a built-in layout (forks, redeployments)
    pub fn register_builtin_layout(
        &mut self,
        program_id: Pubkey,
        layout: BuiltinLayout,
    ) -> Result<(), RegistrationError> {
        self.check_and_insert(RegisteredProtocol::builtin(program_id, layout))
    }

    pub fn resolve(&self, program_id: &Pubkey) -> Result<RegisteredProtocol, ParseError> {
        self.entries
            .get(program_id)
            .cloned()
            .ok_or(ParseError::UnsupportedProgram(*program_id))
    }

    pub fn protocol_for(&self, program_id: &Pubkey) -> Option<Protocol> {
        self.entries.get(program_id).map(|entry| entry.protocol)
    }

    pub fn is_supported(&self, program_id: &Pubkey) -> bool {
        self.entries.contains_key(program_id)
    }

    /// All registered program ids, sorted for stable output
    pub fn supported_programs(&self) -> Vec<Pubkey> {
        let mut programs: Vec<Pubkey> = self.entries.keys().copied().collect();
        programs.sort();
        programs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ProtocolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

// =============================================================================
// PROCESS-WIDE REGISTRY
// =============================================================================

static REGISTRY: Lazy<RwLock<ProtocolRegistry>> =
    Lazy::new(|| RwLock::new(ProtocolRegistry::with_builtins()));

/// Register a protocol in the process-wide registry
pub fn register<D, N>(program_id: Pubkey, decoder: D, normalizer: N) -> Result<(), RegistrationError>
where
    D: LayoutDecoder,
    N: PoolNormalizer<D::Record>,
{
    REGISTRY.write().register(program_id, decoder, normalizer)
}

/// Resolve a program id against the process-wide registry
pub fn resolve(program_id: &Pubkey) -> Result<RegisteredProtocol, ParseError> {
    REGISTRY.read().resolve(program_id)
}

/// Copy of the process-wide registry, for batch work that should not touch the lock
pub fn snapshot() -> ProtocolRegistry {
    REGISTRY.read().clone()
}

/// Replace the process-wide registry wholesale (startup configuration)
pub fn install(registry: ProtocolRegistry) {
    logger::info(
        LogTag::Registry,
        &format!("Installing registry with {} programs", registry.len()),
    );
    *REGISTRY.write() = registry;
}

/// Rebuild the process-wide registry from config
pub fn configure(config: &DecoderConfig) -> Result<(), ConfigError> {
    install(ProtocolRegistry::from_config(config)?);
    Ok(())
}
