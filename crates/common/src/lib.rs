//! Photobooth Common Utilities
//!
//! Shared infrastructure for all Photobooth crates:
//! - Error taxonomy and result alias
//! - Date clock used for the composite date stamp
//! - Tracing/logging initialization
//! - Configuration loading
//! - Atomic file writes

pub mod clock;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
