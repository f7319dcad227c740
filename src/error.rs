//! # Error Types
//!
//! Structural errors for the peer-wire codecs.
//!
//! Every variant describes one way a byte sequence (or a value handed to a
//! constructor) fails to match the wire format. None of them are recoverable
//! inside the codecs: the caller decides whether a malformed handshake or
//! message ends the connection.
//!
//! ## Error Categories
//! - **Cursor underrun**: `BufferExhausted`, `InsufficientBytes`
//! - **Construction**: `InvalidFieldLength`
//! - **Framing**: `InvalidLength`, `TruncatedFrame`, `OversizedFrame`
//! - **Handshake magic**: `InvalidProtocolLength`, `InvalidProtocolString`, `InvalidReserved`
//! - **Ambient**: `Io`, `ConfigError`
//!
//! ## Example Usage
//! ```rust
//! use peer_wire::error::ProtocolError;
//! use peer_wire::protocol::handshake;
//!
//! match handshake::decode(&[0u8; 67]) {
//!     Err(ProtocolError::InvalidLength { expected, actual }) => {
//!         assert_eq!((expected, actual), (68, 67));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Configuration loading errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
    pub const ERR_CONFIG_INVALID: &str = "Configuration validation failed";

    /// Logging setup errors
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
}

// ProtocolError is the error type for every codec operation
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Buffer exhausted: no bytes remain")]
    BufferExhausted,

    #[error("Insufficient bytes: requested {requested}, {remaining} remaining")]
    InsufficientBytes { requested: usize, remaining: usize },

    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid packet length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid protocol string length: {0:#04x}")]
    InvalidProtocolLength(u8),

    #[error("Invalid protocol string")]
    InvalidProtocolString,

    #[error("Reserved bytes must be zero")]
    InvalidReserved,

    #[error("Truncated frame: declared {declared} bytes, {available} available")]
    TruncatedFrame { declared: usize, available: usize },

    #[error("Frame too large: {size} bytes (max {max})")]
    OversizedFrame { size: usize, max: usize },

    #[error("Unknown message kind: {0}")]
    UnknownMessageKind(u8),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
