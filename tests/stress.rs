#![allow(clippy::unwrap_used)]

use bytes::BytesMut;
use peer_wire::core::codec::MessageCodec;
use peer_wire::protocol::handshake;
use peer_wire::protocol::message::{MessageKind, MessagePacket};
use tokio_util::codec::Encoder;

#[test]
fn stress_message_encode_decode_large_series() {
    let mut codec = MessageCodec::new();
    let mut buf = BytesMut::new();

    for size in [0usize, 1, 64, 512, 4096, 16_384, 65_536] {
        for _ in 0..5_000 {
            let p = MessagePacket::new(MessageKind::Piece, vec![0u8; size]);
            codec.encode(p, &mut buf).unwrap();
            let decoded = MessagePacket::from_bytes(&buf);
            assert!(decoded.is_ok());
            buf.clear();
        }
    }
}

#[test]
fn stress_handshake_series() {
    for i in 0..50_000u32 {
        let mut info_hash = [0u8; 20];
        info_hash[..4].copy_from_slice(&i.to_be_bytes());
        let bytes = handshake::encode(&info_hash, &[0x2D; 20]).unwrap();
        assert_eq!(handshake::decode(&bytes).unwrap().info_hash(), &info_hash);
    }
}
