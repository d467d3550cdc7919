//! Reader configuration.
//!
//! Built in code or parsed from TOML:
//!
//! ```toml
//! mode = "mixed"       # lf | cr | crlf | mixed
//! decode = "lossy"     # strict | lossy
//! max_line_len = 65536 # omit for unbounded lines
//! ```

use serde::{Deserialize, Serialize};

use crate::delimiter::DelimiterMode;
use crate::error::ConfigError;

/// How completed line bytes become text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Invalid UTF-8 is reported per line as a [`DecodeError`](crate::DecodeError).
    #[default]
    Strict,
    /// Invalid sequences become U+FFFD.
    Lossy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfig {
    pub mode: DelimiterMode,
    pub decode: DecodePolicy,
    /// Maximum bytes a line may accumulate before it is discarded.
    /// `None` accumulates without bound.
    pub max_line_len: Option<usize>,
}

impl ReaderConfig {
    pub fn new(mode: DelimiterMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_decode(mut self, decode: DecodePolicy) -> Self {
        self.decode = decode;
        self
    }

    pub fn with_max_line_len(mut self, limit: usize) -> Self {
        self.max_line_len = Some(limit);
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_len == Some(0) {
            return Err(ConfigError::Invalid {
                message: "max_line_len must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
