//! Protocol negotiation — pick the best protocol two endpoints both speak.
//!
//! Each side registers the named, versioned protocols it implements. Given the
//! ids a peer advertises (`name[:b]@version`), the [`Negotiator`] deterministically
//! selects the highest-precedence one it also knows, optionally preferring
//! binary encodings, without any back-and-forth handshake.

pub mod config;
pub mod protocol;
pub mod types;

pub use config::{load_config, NegotiatorConfig};
pub use protocol::{BinaryFilter, Negotiator};
pub use types::{NegotiationError, NegotiationResult, ProtocolDescriptor, ProtocolSpec};
