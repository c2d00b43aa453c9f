//! Configuration loading for declaring protocols up front.

pub mod loader;

pub use loader::{load_config, NegotiatorConfig, ProtocolEntry};
