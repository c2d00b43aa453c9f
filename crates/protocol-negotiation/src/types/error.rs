//! Error types for configuration loading.
//!
//! Negotiation itself never fails: an unmatched selection is `None` and a
//! repeated destroy is `false`. Only reading a negotiator configuration can.

use std::path::PathBuf;

/// Errors produced while loading or validating a [`NegotiatorConfig`](crate::config::NegotiatorConfig).
#[derive(Debug, thiserror::Error)]
pub enum NegotiationError {
    /// The config file could not be read.
    #[error("failed to read config {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),

    /// The config file is not valid TOML for the expected shape.
    #[error("failed to parse config {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),

    /// An inline config string is not valid TOML for the expected shape.
    #[error("failed to parse config: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// A protocol entry has an empty name.
    #[error("protocol entry {0} has an empty name")]
    EmptyName(usize),

    /// The binary boost is negative, NaN or infinite.
    #[error("binary boost must be a finite, non-negative number (got {0})")]
    InvalidBoost(f64),
}

impl NegotiationError {
    /// Path of the offending file, when the error came from one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::ReadFailed(path, _) | Self::ParseFailed(path, _) => Some(path),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type NegotiationResult<T> = Result<T, NegotiationError>;
