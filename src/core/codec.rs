//! Tokio codecs that delimit a live byte stream into peer-wire packets.
//!
//! Both decoders return `Ok(None)` until a whole packet is buffered, then
//! split it off the read buffer without copying and hand it to the pure
//! codecs in [`crate::protocol`]. Use `HandshakeCodec` for the first 68
//! bytes of a connection and switch to `MessageCodec` afterwards (for
//! example with `FramedParts` / `Framed::map_codec`).

use crate::config::{DEFAULT_MAX_FRAME_SIZE, HANDSHAKE_LEN, LENGTH_PREFIX_SIZE};
use crate::error::ProtocolError;
use crate::protocol::handshake::HandshakePacket;
use crate::protocol::message::MessagePacket;
use crate::utils::metrics::WireMetrics;
use bytes::BytesMut;
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace, warn};

/// Codec for the fixed-size handshake
#[derive(Debug, Clone, Default)]
pub struct HandshakeCodec {
    metrics: Option<Arc<WireMetrics>>,
}

impl HandshakeCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record handshakes into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<WireMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

impl Decoder for HandshakeCodec {
    type Item = HandshakePacket;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < HANDSHAKE_LEN {
            src.reserve(HANDSHAKE_LEN - src.len());
            return Ok(None);
        }

        let frame = src.split_to(HANDSHAKE_LEN);
        match HandshakePacket::from_bytes(&frame) {
            Ok(packet) => {
                debug!("Handshake received");
                if let Some(metrics) = &self.metrics {
                    metrics.handshake_received();
                }
                Ok(Some(packet))
            }
            Err(e) => {
                warn!(error = %e, "Rejected handshake");
                if let Some(metrics) = &self.metrics {
                    metrics.handshake_rejected();
                }
                Err(e)
            }
        }
    }
}

impl Encoder<HandshakePacket> for HandshakeCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: HandshakePacket, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.write_to(dst);
        if let Some(metrics) = &self.metrics {
            metrics.handshake_sent();
        }
        Ok(())
    }
}

/// Codec for length-prefixed messages
#[derive(Debug, Clone)]
pub struct MessageCodec {
    max_frame_size: usize,
    metrics: Option<Arc<WireMetrics>>,
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCodec {
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    /// Cap the declared body length (id + payload) at `max_frame_size`
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self {
            max_frame_size,
            metrics: None,
        }
    }

    /// Record frames into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<WireMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    fn reject(&self, error: ProtocolError) -> ProtocolError {
        warn!(error = %error, "Rejected message frame");
        if let Some(metrics) = &self.metrics {
            metrics.frame_rejected();
        }
        error
    }
}

impl Decoder for MessageCodec {
    type Item = MessagePacket;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < LENGTH_PREFIX_SIZE {
            return Ok(None);
        }

        let declared = u32::from_be_bytes([src[0], src[1], src[2], src[3]]) as usize;
        if declared > self.max_frame_size {
            return Err(self.reject(ProtocolError::OversizedFrame {
                size: declared,
                max: self.max_frame_size,
            }));
        }

        let total = LENGTH_PREFIX_SIZE + declared;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        let frame = src.split_to(total).freeze();
        let packet = MessagePacket::from_frame(frame).map_err(|e| self.reject(e))?;

        trace!(id = ?packet.id(), length = total, "Message frame decoded");
        if let Some(metrics) = &self.metrics {
            metrics.message_received(total as u64, packet.is_keep_alive());
        }

        Ok(Some(packet))
    }
}

impl Encoder<MessagePacket> for MessageCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: MessagePacket, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let body = item.body_len();
        if body > self.max_frame_size {
            return Err(self.reject(ProtocolError::OversizedFrame {
                size: body,
                max: self.max_frame_size,
            }));
        }

        item.write_to(dst);

        trace!(id = ?item.id(), length = item.length(), "Message frame encoded");
        if let Some(metrics) = &self.metrics {
            metrics.message_sent(item.length() as u64);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::protocol::message::MessageKind;
    use bytes::BufMut;

    #[test]
    fn test_handshake_waits_for_full_packet() {
        let mut codec = HandshakeCodec::new();
        let bytes = HandshakePacket::from_parts([1; 20], [2; 20]).to_bytes();

        let mut buf = BytesMut::from(&bytes[..67]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 67);

        buf.extend_from_slice(&bytes[67..]);
        buf.extend_from_slice(&[0, 0, 0, 0]);
        let packet = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(packet.peer_id(), &[2; 20]);

        // The keep-alive that followed stays for the message codec
        assert_eq!(&buf[..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_message_roundtrip_through_buffer() {
        let mut codec = MessageCodec::new();
        let mut buf = BytesMut::new();

        codec.encode(MessagePacket::keep_alive(), &mut buf).unwrap();
        codec
            .encode(MessagePacket::new(MessageKind::Have, vec![0, 0, 0, 7]), &mut buf)
            .unwrap();

        assert!(codec.decode(&mut buf).unwrap().unwrap().is_keep_alive());
        let have = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(have.kind(), Some(MessageKind::Have));
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_oversized_declared_length_rejected() {
        let metrics = Arc::new(WireMetrics::new());
        let mut codec = MessageCodec::with_max_frame_size(16).with_metrics(metrics.clone());

        let mut buf = BytesMut::new();
        buf.put_u32(17);
        buf.put_u8(7);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::OversizedFrame { size: 17, max: 16 })
        ));
        assert_eq!(metrics.snapshot().frames_rejected, 1);
    }

    #[test]
    fn test_encode_rejects_oversized_packet() {
        let mut codec = MessageCodec::with_max_frame_size(4);
        let mut buf = BytesMut::new();
        let packet = MessagePacket::new(MessageKind::Piece, vec![0u8; 4]);

        assert!(codec.encode(packet, &mut buf).is_err());
        assert!(buf.is_empty());
    }
}
