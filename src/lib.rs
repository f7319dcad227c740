//! # peer-wire
//!
//! Byte-exact codecs for the BitTorrent peer-wire protocol: the 68-byte
//! connection handshake and the length-prefixed message that carries every
//! later exchange (choke, unchoke, interested, not interested, have,
//! bitfield, request, piece, cancel, keep-alive).
//!
//! The codecs only turn bytes into typed packets and back, rejecting
//! structurally invalid input. Connection handling, peer state and piece
//! bookkeeping live elsewhere.
//!
//! ## Wire Formats
//! ```text
//! Handshake: [19] ["BitTorrent protocol"] [reserved(8)=0] [info_hash(20)] [peer_id(20)]
//! Message:   [length(4, BE)] [id(1)] [payload(length - 1)]     length 0 = keep-alive
//! ```
//!
//! ## Example
//! ```rust
//! use peer_wire::{handshake, message, MessageKind, MessagePacket};
//!
//! let bytes = handshake::encode(&[1u8; 20], &[2u8; 20]).unwrap();
//! let packet = handshake::decode(&bytes).unwrap();
//! assert_eq!(packet.peer_id(), &[2u8; 20]);
//!
//! let have = MessagePacket::new(MessageKind::Have, 7u32.to_be_bytes().to_vec());
//! let frame = message::encode(&have);
//! assert_eq!(message::decode(&frame).unwrap(), have);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::codec::{HandshakeCodec, MessageCodec};
pub use crate::core::cursor::ByteCursor;
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::{handshake, message};
pub use crate::protocol::{HandshakePacket, MessageKind, MessagePacket};
