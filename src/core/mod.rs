//! # Core Framing Components
//!
//! Low-level byte handling shared by the packet codecs.
//!
//! ## Components
//! - **Cursor**: forward-only bounded reader over a borrowed byte slice
//! - **Codec**: Tokio codecs that delimit a byte stream into handshakes and messages
//!
//! ## Security
//! - Declared message lengths are checked against a frame size cap before
//!   any buffer space is reserved for them

pub mod codec;
pub mod cursor;
