/// Log tags identify the subsystem a message comes from
///
/// Each tag has a debug key used by `--debug-<key>` flags and the
/// `logging.debug_tags` config list.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    /// Account decoding and dispatch
    Decoder,
    /// Protocol registration
    Registry,
    /// Configuration loading
    Config,
    /// Binaries and startup
    System,
}

impl LogTag {
    pub const ALL: [LogTag; 4] = [LogTag::Decoder, LogTag::Registry, LogTag::Config, LogTag::System];

    /// Key used in debug flags and config
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::Decoder => "decoder",
            LogTag::Registry => "registry",
            LogTag::Config => "config",
            LogTag::System => "system",
        }
        .to_string()
    }

    /// Uppercase label printed in the tag column
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::Decoder => "DECODER",
            LogTag::Registry => "REGISTRY",
            LogTag::Config => "CONFIG",
            LogTag::System => "SYSTEM",
        }
    }

    pub fn from_debug_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|tag| tag.to_debug_key() == key)
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys_resolve_back() {
        for tag in LogTag::ALL {
            assert_eq!(LogTag::from_debug_key(&tag.to_debug_key()), Some(tag));
        }
        assert_eq!(LogTag::from_debug_key(" Decoder "), Some(LogTag::Decoder));
        assert_eq!(LogTag::from_debug_key("wallet"), None);
    }
}
