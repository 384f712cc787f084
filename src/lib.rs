//! Bunko: manga/e-book catalog engine with content-addressed reconciliation.
//!
//! The crate walks configured scan roots, hashes every accepted file
//! (SHA-256), parses book metadata out of filenames with prioritized regex
//! rules, and converges a SQLite catalog to match the observed filesystem
//! state: in-place content updates first, then moves, inserts, and deletes.

pub mod engine;
pub mod rules;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

/// Result alias used by the public bunko API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
