//! # Configuration Management
//!
//! Wire constants and the runtime configuration for the framing and logging
//! layers.
//!
//! The constants pin the byte layout of the handshake and the message frame;
//! they are not configurable. `WireConfig` only tunes the stream-framing
//! adapter (frame size limit, buffer sizing) and logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment overrides via `from_env()`

use crate::core::codec::MessageCodec;
use crate::error::{constants, ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tracing::Level;

/// Protocol identifier carried in every handshake
pub const PROTOCOL_STRING: &[u8; 19] = b"BitTorrent protocol";

/// Length byte that precedes the protocol identifier (0x13)
pub const PSTRLEN: u8 = 19;

/// Reserved bytes between the protocol identifier and the info hash
pub const RESERVED_LEN: usize = 8;

/// Size of an info hash or a peer id
pub const HASH_LEN: usize = 20;

/// Total size of a handshake on the wire
pub const HANDSHAKE_LEN: usize = 1 + PSTRLEN as usize + RESERVED_LEN + HASH_LEN + HASH_LEN;

/// Size of the big-endian length prefix of a message frame
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default cap on a message body accepted by the stream codec (1 MiB)
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Hard upper bound for a configured frame size (16 MiB)
pub const MAX_FRAME_SIZE_LIMIT: usize = 16 * 1024 * 1024;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WireConfig {
    /// Stream framing configuration
    #[serde(default)]
    pub framing: FramingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WireConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_OPEN))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_READ))
        })?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE))
        })
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(size) = std::env::var("PEER_WIRE_MAX_FRAME_SIZE") {
            config.framing.max_frame_size = size.parse::<usize>().map_err(|e| {
                ProtocolError::ConfigError(format!("Invalid PEER_WIRE_MAX_FRAME_SIZE: {e}"))
            })?;
        }

        if let Ok(level) = std::env::var("PEER_WIRE_LOG_LEVEL") {
            config.logging.log_level = level.parse::<Level>().map_err(|_| {
                ProtocolError::ConfigError(format!("Invalid PEER_WIRE_LOG_LEVEL: {level}"))
            })?;
        }

        if let Ok(json) = std::env::var("PEER_WIRE_LOG_JSON") {
            config.logging.json_format = matches!(json.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_SERIALIZE))
        })?;

        std::fs::write(path, content).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_WRITE))
        })?;

        Ok(())
    }

    /// Validate the configuration
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.framing.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "{}:\n  - {}",
                constants::ERR_CONFIG_INVALID,
                errors.join("\n  - ")
            )))
        }
    }
}

/// Stream framing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FramingConfig {
    /// Largest message body (id + payload) the stream codec accepts
    pub max_frame_size: usize,

    /// Capacity reserved up front for the read buffer of a framed stream
    pub initial_buffer_capacity: usize,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            initial_buffer_capacity: 8 * 1024,
        }
    }
}

impl FramingConfig {
    /// Validate framing configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // A frame must at least hold the id byte
        if self.max_frame_size == 0 {
            errors.push("Max frame size must be greater than 0".to_string());
        } else if self.max_frame_size > MAX_FRAME_SIZE_LIMIT {
            errors.push(format!(
                "Max frame size too large: {} bytes (maximum: {MAX_FRAME_SIZE_LIMIT})",
                self.max_frame_size
            ));
        }

        if self.initial_buffer_capacity < HANDSHAKE_LEN {
            errors.push(format!(
                "Initial buffer capacity too small: {} bytes (minimum: {HANDSHAKE_LEN})",
                self.initial_buffer_capacity
            ));
        }

        errors
    }

    /// Build a message codec honouring this configuration
    pub fn message_codec(&self) -> MessageCodec {
        MessageCodec::with_max_frame_size(self.max_frame_size)
    }

    /// Wrap `io` in a message-framed stream whose read buffer starts at
    /// `initial_buffer_capacity`
    pub fn framed<T>(&self, io: T) -> Framed<T, MessageCodec>
    where
        T: AsyncRead + AsyncWrite,
    {
        Framed::with_capacity(io, self.message_codec(), self.initial_buffer_capacity)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("peer-wire"),
            log_level: Level::INFO,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
