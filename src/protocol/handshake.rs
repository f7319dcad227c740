//! Peer-wire handshake: the fixed 68-byte packet exchanged once when a
//! connection opens.
//!
//! ```text
//! [pstrlen(1)=19] [pstr(19)="BitTorrent protocol"] [reserved(8)=0] [info_hash(20)] [peer_id(20)]
//! ```
//!
//! Decoding validates fields in wire order and stops at the first mismatch,
//! so later fields are never inspected once an earlier check fails.

use crate::config::{HANDSHAKE_LEN, HASH_LEN, PROTOCOL_STRING, PSTRLEN, RESERVED_LEN};
use crate::core::cursor::ByteCursor;
use crate::error::{ProtocolError, Result};
use bytes::{BufMut, BytesMut};

/// Handshake exchanged at connection setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandshakePacket {
    info_hash: [u8; HASH_LEN],
    peer_id: [u8; HASH_LEN],
}

impl HandshakePacket {
    /// Build a handshake from borrowed fields.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidFieldLength` if either field is not
    /// exactly 20 bytes. The info hash is checked first.
    pub fn new(info_hash: &[u8], peer_id: &[u8]) -> Result<Self> {
        Ok(Self {
            info_hash: fixed_field("info_hash", info_hash)?,
            peer_id: fixed_field("peer_id", peer_id)?,
        })
    }

    /// Build a handshake from fields whose size is already fixed by type
    pub fn from_parts(info_hash: [u8; HASH_LEN], peer_id: [u8; HASH_LEN]) -> Self {
        Self { info_hash, peer_id }
    }

    pub fn info_hash(&self) -> &[u8; HASH_LEN] {
        &self.info_hash
    }

    pub fn peer_id(&self) -> &[u8; HASH_LEN] {
        &self.peer_id
    }

    /// Parse a handshake from exactly 68 bytes.
    ///
    /// # Errors
    /// - `InvalidLength` unless `bytes.len() == 68`
    /// - `InvalidProtocolLength` if the first byte is not 0x13
    /// - `InvalidProtocolString` if the identifier is not "BitTorrent protocol"
    /// - `InvalidReserved` if any reserved byte is non-zero
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != HANDSHAKE_LEN {
            return Err(ProtocolError::InvalidLength {
                expected: HANDSHAKE_LEN,
                actual: bytes.len(),
            });
        }

        let mut cursor = ByteCursor::new(bytes);

        let pstrlen = cursor.read_byte()?;
        if pstrlen != PSTRLEN {
            return Err(ProtocolError::InvalidProtocolLength(pstrlen));
        }

        if cursor.read_bytes(PROTOCOL_STRING.len())? != PROTOCOL_STRING {
            return Err(ProtocolError::InvalidProtocolString);
        }

        if cursor.read_bytes(RESERVED_LEN)?.iter().any(|&b| b != 0) {
            return Err(ProtocolError::InvalidReserved);
        }

        let info_hash = fixed_field("info_hash", cursor.read_bytes(HASH_LEN)?)?;
        let peer_id = fixed_field("peer_id", cursor.read_bytes(HASH_LEN)?)?;

        Ok(Self { info_hash, peer_id })
    }

    /// Append the 68-byte wire form to `dst`
    pub fn write_to(&self, dst: &mut BytesMut) {
        dst.reserve(HANDSHAKE_LEN);
        dst.put_u8(PSTRLEN);
        dst.put_slice(PROTOCOL_STRING);
        dst.put_bytes(0, RESERVED_LEN);
        dst.put_slice(&self.info_hash);
        dst.put_slice(&self.peer_id);
    }

    /// Encode into a freshly allocated 68-byte buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(HANDSHAKE_LEN);
        self.write_to(&mut buf);
        buf.to_vec()
    }
}

/// Encode a handshake from raw fields, validating both before emitting anything
pub fn encode(info_hash: &[u8], peer_id: &[u8]) -> Result<Vec<u8>> {
    Ok(HandshakePacket::new(info_hash, peer_id)?.to_bytes())
}

/// Decode a handshake from exactly 68 bytes
pub fn decode(bytes: &[u8]) -> Result<HandshakePacket> {
    HandshakePacket::from_bytes(bytes)
}

fn fixed_field(field: &'static str, bytes: &[u8]) -> Result<[u8; HASH_LEN]> {
    bytes
        .try_into()
        .map_err(|_| ProtocolError::InvalidFieldLength {
            field,
            expected: HASH_LEN,
            actual: bytes.len(),
        })
}
