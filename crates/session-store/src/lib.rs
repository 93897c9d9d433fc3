//! Photobooth Session Store
//!
//! Maps an opaque session identifier to a directory of raw captures:
//!
//! ```text
//! <root>/raw/<session_id>/photo_<index>.png
//! ```
//!
//! The directory is derived purely from the identifier, so there is no
//! registry to synchronize. Sessions are isolated from each other by
//! directory; writes within a session are last-write-wins per index.

pub mod session;
pub mod store;

pub use session::*;
pub use store::*;
