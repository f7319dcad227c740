//! Integration tests for zero-copy framing
//!
//! The stream codecs split complete frames off the read buffer and hand the
//! payload out as a view into that buffer.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bytes::{BufMut, BytesMut};
use peer_wire::core::codec::{HandshakeCodec, MessageCodec};
use peer_wire::protocol::message::{MessageKind, MessagePacket};
use peer_wire::HandshakePacket;
use tokio_util::codec::{Decoder, Encoder};

#[test]
fn test_codec_decode_payload_points_into_buffer() {
    let mut codec = MessageCodec::new();
    let mut buffer = BytesMut::new();
    buffer.put_u32(4);
    buffer.put_u8(MessageKind::Bitfield.as_u8());
    buffer.extend_from_slice(&[0xF0, 0x0F, 0xAA]);

    let payload_ptr = buffer[5..].as_ptr();
    let packet = codec
        .decode(&mut buffer)
        .expect("Failed to decode")
        .expect("Should have packet");

    assert_eq!(packet.payload().unwrap().as_ptr(), payload_ptr);
    assert_eq!(buffer.len(), 0);
}

#[test]
fn test_codec_partial_prefix_preserves_buffer() {
    let mut codec = MessageCodec::new();
    let mut buffer = BytesMut::from(&[0x00, 0x00, 0x00][..]);

    let result = codec.decode(&mut buffer).expect("Decode should not error");

    assert!(result.is_none());
    assert_eq!(buffer.len(), 3);
}

#[test]
fn test_codec_partial_body_reserves_remaining() {
    let mut codec = MessageCodec::new();
    let mut buffer = BytesMut::new();
    buffer.put_u32(1 + 4096);
    buffer.put_u8(MessageKind::Piece.as_u8());

    assert!(codec.decode(&mut buffer).unwrap().is_none());
    assert_eq!(buffer.len(), 5);
    assert!(buffer.capacity() >= 4 + 1 + 4096);
}

#[test]
fn test_codec_encode_writes_exact_frame() {
    let mut codec = MessageCodec::new();
    let packet = MessagePacket::new(MessageKind::Piece, vec![0u8; 100]);

    let mut buffer = BytesMut::new();
    codec.encode(packet.clone(), &mut buffer).expect("Failed to encode");

    assert_eq!(buffer.len(), 4 + 1 + 100);
    assert_eq!(&buffer[..4], &101u32.to_be_bytes());

    let decoded = MessagePacket::from_frame(buffer.freeze()).expect("Failed to decode");
    assert_eq!(decoded, packet);
}

#[test]
fn test_codec_multiple_packets_in_buffer() {
    let mut codec = MessageCodec::new();
    let mut buffer = BytesMut::new();

    let packets = vec![
        MessagePacket::new(MessageKind::Unchoke, Vec::new()),
        MessagePacket::keep_alive(),
        MessagePacket::new(MessageKind::Have, vec![0, 0, 0, 9]),
    ];
    for packet in &packets {
        codec.encode(packet.clone(), &mut buffer).unwrap();
    }

    let mut decoded = Vec::new();
    while let Some(packet) = codec.decode(&mut buffer).expect("Failed to decode") {
        decoded.push(packet);
    }

    assert_eq!(decoded, packets);
    assert!(buffer.is_empty());
}

#[test]
fn test_codec_incremental_buffer_fill() {
    let mut codec = MessageCodec::new();
    let packet = MessagePacket::new(MessageKind::Request, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    let full_bytes = packet.to_bytes();

    let mut buffer = BytesMut::new();

    // Add data byte by byte (simulating slow network)
    for (i, byte) in full_bytes.iter().enumerate() {
        buffer.extend_from_slice(&[*byte]);

        let result = codec.decode(&mut buffer).expect("Should not error");

        if i < full_bytes.len() - 1 {
            assert!(result.is_none());
            assert!(!buffer.is_empty());
        } else {
            assert_eq!(result.unwrap(), packet);
            assert_eq!(buffer.len(), 0);
        }
    }
}

#[test]
fn test_handshake_then_messages_share_buffer() {
    let mut handshake_codec = HandshakeCodec::new();
    let mut message_codec = MessageCodec::new();

    let mut buffer = BytesMut::new();
    handshake_codec
        .encode(HandshakePacket::from_parts([7; 20], [8; 20]), &mut buffer)
        .unwrap();
    message_codec
        .encode(MessagePacket::new(MessageKind::Interested, Vec::new()), &mut buffer)
        .unwrap();

    let handshake = handshake_codec.decode(&mut buffer).unwrap().unwrap();
    assert_eq!(handshake.info_hash(), &[7; 20]);

    let interested = message_codec.decode(&mut buffer).unwrap().unwrap();
    assert_eq!(interested.kind(), Some(MessageKind::Interested));
    assert!(buffer.is_empty());
}

#[test]
fn test_invalid_handshake_is_consumed_and_reported() {
    let mut codec = HandshakeCodec::new();
    let mut bytes = HandshakePacket::from_parts([0; 20], [0; 20]).to_bytes();
    bytes[0] = 0x14;

    let mut buffer = BytesMut::from(&bytes[..]);
    assert!(codec.decode(&mut buffer).is_err());
    assert!(buffer.is_empty());
}
