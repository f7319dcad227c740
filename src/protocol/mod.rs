//! # Peer-Wire Packets
//!
//! Typed packets for the two shapes on the peer-wire:
//!
//! - **Handshake**: fixed 68-byte identification packet, sent once per connection
//! - **Message**: 4-byte length prefix, 1-byte id, opaque payload; length 0 is a keep-alive
//!
//! Both codecs are pure functions over complete, already-delimited byte
//! sequences. Delimiting a live byte stream is handled by
//! [`crate::core::codec`].

pub mod handshake;
pub mod message;


pub use handshake::HandshakePacket;
pub use message::{MessageKind, MessagePacket};
