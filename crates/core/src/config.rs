//! Codec configuration.
//!
//! Every option has a default, so `CodecConfig::default()` is a complete
//! configuration. Setters follow the `with_*` builder style.

use crate::error::{Error, Result};

/// What to do with input that has exactly one distinct symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingleSymbolPolicy {
    /// Encode it with a filler leaf and one `1` bit per occurrence
    #[default]
    Encode,
    /// Fail with `Error::SingleSymbolRejected`
    Reject,
}

/// Complete configuration for a [`Codec`](crate::codec::Codec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    // === Compression ===
    /// Handling of single-distinct-symbol input
    pub single_symbol: SingleSymbolPolicy,

    /// Largest accepted input in bytes (None = unlimited)
    pub max_input_len: Option<usize>,

    // === Decompression ===
    /// Require the leading marker/padding run to be 1..=8 zero bits
    pub strict_framing: bool,
}

impl CodecConfig {
    pub fn with_single_symbol(mut self, policy: SingleSymbolPolicy) -> Self {
        self.single_symbol = policy;
        self
    }

    pub fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }

    pub fn with_strict_framing(mut self, strict: bool) -> Self {
        self.strict_framing = strict;
        self
    }

    /// Check option values for consistency.
    ///
    /// # Errors
    /// `Error::Config` if `max_input_len` is zero (nothing could ever be
    /// compressed).
    pub fn validate(&self) -> Result<()> {
        if self.max_input_len == Some(0) {
            return Err(Error::Config("max_input_len must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            single_symbol: SingleSymbolPolicy::Encode,
            max_input_len: None,
            strict_framing: true,
        }
    }
}
