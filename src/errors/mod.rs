/// Structured error types for pool account decoding
///
/// Three layers, matching the three stages a raw account goes through:
/// - `DecodeError`: a layout decoder or normalizer rejected the bytes
/// - `ParseError`: what the dispatcher returns, with protocol/program context attached
/// - `RegistrationError`: registry misconfiguration, surfaced at registration time
///
/// `ConfigError` covers loading the TOML config and applying it to a registry.
use crate::pools::types::Protocol;
use solana_sdk::pubkey::Pubkey;
use std::fmt;

// =============================================================================
// DISCRIMINATOR
// =============================================================================

/// Raw discriminator bytes as read from an account, kept for triage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Discriminator(pub Vec<u8>);

impl Discriminator {
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn is_zeroed(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

// =============================================================================
// DECODE ERRORS
// =============================================================================

/// Failure produced by a layout decoder or a normalizer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Truncated account: layout requires {expected} bytes, got {actual}")]
    TruncatedAccount {
        expected: usize,
        actual: usize,
    },

    #[error("Unknown layout version: discriminator {discriminator}")]
    UnknownLayoutVersion {
        discriminator: Discriminator,
    },

    #[error("Uninitialized pool: field '{field}' holds the zero sentinel")]
    UninitializedPool {
        field: &'static str,
    },
}

// =============================================================================
// PARSE ERRORS (dispatcher level)
// =============================================================================

/// Failure returned by the dispatcher
///
/// Every variant carries the program id, and decode failures also carry the
/// protocol tag, so batch callers can attribute failures without re-parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported program: {0}")]
    UnsupportedProgram(Pubkey),

    #[error("{protocol} pool owned by {program_id} failed to decode: {source}")]
    Decode {
        protocol: Protocol,
        program_id: Pubkey,
        #[source]
        source: DecodeError,
    },

    #[error(
        "Normalizer for {program_id} produced a {produced} pool but the program is registered as {registered}"
    )]
    ProtocolMismatch {
        program_id: Pubkey,
        registered: Protocol,
        produced: Protocol,
    },
}

impl ParseError {
    /// Protocol tag the failure is attributed to, if the program was known
    pub fn protocol(&self) -> Option<Protocol> {
        match self {
            ParseError::UnsupportedProgram(_) => None,
            ParseError::Decode { protocol, .. } => Some(*protocol),
            ParseError::ProtocolMismatch { registered, .. } => Some(*registered),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        match self {
            ParseError::UnsupportedProgram(program_id) => *program_id,
            ParseError::Decode { program_id, .. } => *program_id,
            ParseError::ProtocolMismatch { program_id, .. } => *program_id,
        }
    }

    /// Underlying decode failure, if this error came from a decoder or normalizer
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            ParseError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

// =============================================================================
// REGISTRATION ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error(
        "Conflicting registration for {program_id}: already handled by '{existing}' ({existing_protocol}), refused '{attempted}' ({attempted_protocol})"
    )]
    Conflict {
        program_id: Pubkey,
        existing: &'static str,
        existing_protocol: Protocol,
        attempted: &'static str,
        attempted_protocol: Protocol,
    },
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid program id '{value}' in decoder.program_aliases")]
    InvalidProgramId { value: String },

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("Config already initialized")]
    AlreadyInitialized,

    #[error("Config not initialized")]
    NotInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_display_is_hex() {
        let disc = Discriminator::from_slice(&[0x3f, 0x95, 0x00, 0x0c]);
        assert_eq!(disc.to_string(), "0x3f95000c");
        assert!(!disc.is_zeroed());
        assert!(Discriminator::from_slice(&[0; 8]).is_zeroed());
    }

    #[test]
    fn test_parse_error_attribution() {
        let program_id = Pubkey::new_unique();
        let err = ParseError::Decode {
            protocol: Protocol::ConcentratedLiquidity,
            program_id,
            source: DecodeError::TruncatedAccount {
                expected: 653,
                actual: 10,
            },
        };

        assert_eq!(err.protocol(), Some(Protocol::ConcentratedLiquidity));
        assert_eq!(err.program_id(), program_id);
        assert!(matches!(
            err.decode_error(),
            Some(DecodeError::TruncatedAccount { expected: 653, actual: 10 })
        ));

        let unsupported = ParseError::UnsupportedProgram(program_id);
        assert_eq!(unsupported.protocol(), None);
        assert!(unsupported.decode_error().is_none());
    }
}
