//! Data types shared across the negotiator.

pub mod descriptor;
pub mod error;

// Re-export commonly used types for convenience.
pub use descriptor::*;
pub use error::*;
