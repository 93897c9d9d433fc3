//! Photobooth Render Engine
//!
//! Turns four raw captures and a frame overlay into one printable
//! composite, stamped with the date and a QR code linking to itself.
//!
//! # Pipeline Architecture
//!
//! ```text
//! photo_a ──┐
//! photo_b ──┤
//! photo_c ──┼── Resize 533x698 ── Paste into 2x2 grid
//! photo_d ──┘                           │
//!                                       ├── Frame overlay (alpha)
//! frame.png ────────────────────────────┘         │
//!                                                 ├── Date stamp
//! public URL ── QR encode ── 90x90 ───────────────┤
//!                                                 ▼
//!                                          Flatten (RGB)
//!                                                 │
//!                                                 ▼
//!                          <session>_<token>_composite.jpg
//! ```

pub mod compositor;
pub mod export;
pub mod layout;
pub mod qr;
pub mod text;

pub use compositor::Compositor;
pub use export::*;
