//! Shared utilities: logging setup and configuration constants.

pub mod config;
pub mod logger;

pub use logger::setup_logging;
