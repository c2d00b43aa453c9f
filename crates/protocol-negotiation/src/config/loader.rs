//! TOML configuration: the binary boost and the protocols to register.
//!
//! ```toml
//! binary_boost = 9999
//!
//! [[protocols]]
//! name = "primus"
//! version = "1.2.0"
//! binary = true
//! transformer = "engine.io"
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::protocol::DEFAULT_BINARY_BOOST;
use crate::types::{NegotiationError, NegotiationResult, ProtocolSpec};

/// Negotiator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NegotiatorConfig {
    /// Bonus added to binary candidates when boosting.
    pub binary_boost: f64,
    /// Protocols to register, in order.
    pub protocols: Vec<ProtocolEntry>,
}

impl Default for NegotiatorConfig {
    fn default() -> Self {
        Self {
            binary_boost: DEFAULT_BINARY_BOOST,
            protocols: Vec::new(),
        }
    }
}

/// One `[[protocols]]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProtocolEntry {
    pub name: String,
    #[serde(default)]
    pub binary: Option<bool>,
    #[serde(default)]
    pub version: Option<String>,
    /// Any other keys, passed through to the descriptor.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProtocolEntry {
    /// The registration spec for this entry.
    pub fn to_spec(&self) -> ProtocolSpec {
        ProtocolSpec {
            binary: self.binary,
            version: self.version.clone(),
            extra: self.extra.clone(),
        }
    }
}

impl NegotiatorConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> NegotiationResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject entries the negotiator could not use meaningfully.
    pub fn validate(&self) -> NegotiationResult<()> {
        if !self.binary_boost.is_finite() || self.binary_boost < 0.0 {
            return Err(NegotiationError::InvalidBoost(self.binary_boost));
        }
        if let Some(index) = self.protocols.iter().position(|p| p.name.is_empty()) {
            return Err(NegotiationError::EmptyName(index));
        }
        Ok(())
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> NegotiationResult<NegotiatorConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| NegotiationError::ReadFailed(path.to_path_buf(), e))?;
    let config: NegotiatorConfig = toml::from_str(&text)
        .map_err(|e| NegotiationError::ParseFailed(path.to_path_buf(), e))?;
    config.validate()?;

    tracing::info!(
        "Loaded {} protocols from {}",
        config.protocols.len(),
        path.display()
    );
    Ok(config)
}
