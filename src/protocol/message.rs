//! Length-prefixed peer-wire messages.
//!
//! ```text
//! [length(4, big-endian)] [id(1)] [payload(length - 1)]
//! ```
//!
//! A length of zero is a keep-alive and ends the frame. The length prefix
//! counts the id byte plus the payload; `MessagePacket::length()` reports
//! the whole frame including the prefix.
//!
//! Ids outside the nine known kinds are carried through untouched; use
//! `MessagePacket::kind()` to interpret them.

use crate::config::LENGTH_PREFIX_SIZE;
use crate::core::cursor::ByteCursor;
use crate::error::{ProtocolError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// Message tags defined by the base protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    /// Stop sending requests
    Choke = 0,
    /// Requests may be sent again
    Unchoke = 1,
    /// Sender wants pieces the receiver has
    Interested = 2,
    NotInterested = 3,
    /// Sender finished downloading a piece
    Have = 4,
    /// Bitmap of the pieces the sender has
    Bitfield = 5,
    /// Ask for a block
    Request = 6,
    /// Deliver a block
    Piece = 7,
    /// Withdraw an earlier request
    Cancel = 8,
}

impl MessageKind {
    pub const ALL: [MessageKind; 9] = [
        MessageKind::Choke,
        MessageKind::Unchoke,
        MessageKind::Interested,
        MessageKind::NotInterested,
        MessageKind::Have,
        MessageKind::Bitfield,
        MessageKind::Request,
        MessageKind::Piece,
        MessageKind::Cancel,
    ];

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::Choke => "CHOKE",
            MessageKind::Unchoke => "UNCHOKE",
            MessageKind::Interested => "INTERESTED",
            MessageKind::NotInterested => "NOT_INTERESTED",
            MessageKind::Have => "HAVE",
            MessageKind::Bitfield => "BITFIELD",
            MessageKind::Request => "REQUEST",
            MessageKind::Piece => "PIECE",
            MessageKind::Cancel => "CANCEL",
        }
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = ProtocolError;

    fn try_from(id: u8) -> Result<Self> {
        MessageKind::ALL
            .get(id as usize)
            .copied()
            .ok_or(ProtocolError::UnknownMessageKind(id))
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Largest id + payload length a 4-byte prefix can carry
pub const MAX_BODY_LEN: usize = u32::MAX as usize;

/// A single peer-wire message, or a keep-alive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessagePacket {
    // id and payload are either both present or both absent (keep-alive)
    body: Option<(u8, Bytes)>,
}

impl MessagePacket {
    /// Zero-length frame that only keeps the connection open
    pub fn keep_alive() -> Self {
        Self { body: None }
    }

    /// Message of a known kind. Pass an empty payload for tag-only kinds.
    ///
    /// The payload must be shorter than `MAX_BODY_LEN`; longer payloads
    /// cannot be described by the length prefix.
    pub fn new(kind: MessageKind, payload: impl Into<Bytes>) -> Self {
        Self::from_raw(kind.as_u8(), payload)
    }

    /// Message with an arbitrary id, known or not. Same payload limit as `new`.
    pub fn from_raw(id: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            body: Some((id, payload.into())),
        }
    }

    pub fn id(&self) -> Option<u8> {
        self.body.as_ref().map(|(id, _)| *id)
    }

    /// Known kind of this message; `None` for keep-alives and unknown ids
    pub fn kind(&self) -> Option<MessageKind> {
        self.id().and_then(|id| MessageKind::try_from(id).ok())
    }

    pub fn payload(&self) -> Option<&Bytes> {
        self.body.as_ref().map(|(_, payload)| payload)
    }

    pub fn is_keep_alive(&self) -> bool {
        self.body.is_none()
    }

    /// Total encoded size: prefix, plus id byte and payload when present
    pub fn length(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.body_len()
    }

    /// Value carried by the length prefix
    pub(crate) fn body_len(&self) -> usize {
        self.body
            .as_ref()
            .map_or(0, |(_, payload)| 1 + payload.len())
    }

    /// Decode a message, copying the payload out of `bytes`.
    ///
    /// # Errors
    /// - `InvalidLength` if fewer than 4 bytes are supplied
    /// - `TruncatedFrame` if the declared length exceeds the bytes after the prefix
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(match parse_frame(bytes)? {
            Some((id, payload)) => Self::from_raw(id, Bytes::copy_from_slice(payload)),
            None => Self::keep_alive(),
        })
    }

    /// Decode a message whose payload shares storage with `frame`
    pub fn from_frame(frame: Bytes) -> Result<Self> {
        Ok(match parse_frame(&frame)? {
            Some((id, payload)) => Self::from_raw(id, frame.slice_ref(payload)),
            None => Self::keep_alive(),
        })
    }

    /// Append the wire form to `dst`
    pub fn write_to(&self, dst: &mut BytesMut) {
        dst.reserve(self.length());
        dst.put_u32(length_prefix(self.body_len()));
        if let Some((id, payload)) = &self.body {
            dst.put_u8(*id);
            dst.put_slice(payload);
        }
    }

    /// Encode into a freshly allocated buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.length());
        self.write_to(&mut buf);
        buf.to_vec()
    }
}

/// Encode a message frame
pub fn encode(packet: &MessagePacket) -> Vec<u8> {
    packet.to_bytes()
}

/// Decode a message frame
pub fn decode(bytes: &[u8]) -> Result<MessagePacket> {
    MessagePacket::from_bytes(bytes)
}

fn length_prefix(body_len: usize) -> u32 {
    debug_assert!(
        body_len <= MAX_BODY_LEN,
        "message body of {body_len} bytes does not fit the length prefix"
    );
    body_len as u32
}

/// Split a frame into its id and payload, `None` for a keep-alive
fn parse_frame(bytes: &[u8]) -> Result<Option<(u8, &[u8])>> {
    if bytes.len() < LENGTH_PREFIX_SIZE {
        return Err(ProtocolError::InvalidLength {
            expected: LENGTH_PREFIX_SIZE,
            actual: bytes.len(),
        });
    }

    let mut cursor = ByteCursor::new(bytes);
    let declared = cursor.read_u32_be()? as usize;
    if declared == 0 {
        return Ok(None);
    }

    if cursor.remaining() < declared {
        return Err(ProtocolError::TruncatedFrame {
            declared,
            available: cursor.remaining(),
        });
    }

    let id = cursor.read_byte()?;
    // Tag-only messages leave the cursor empty, which it reports as exhausted
    let payload = match declared - 1 {
        0 => &[][..],
        n => cursor.read_bytes(n)?,
    };

    Ok(Some((id, payload)))
}
