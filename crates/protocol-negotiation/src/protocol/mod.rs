//! Negotiation layer: the protocol registry and version precedence.

pub mod negotiation;
pub mod version;

pub use negotiation::{BinaryFilter, Negotiator, DEFAULT_BINARY_BOOST};
pub use version::precedence;
