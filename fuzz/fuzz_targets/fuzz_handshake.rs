#![no_main]

use libfuzzer_sys::fuzz_target;
use peer_wire::protocol::handshake;

fuzz_target!(|data: &[u8]| {
    // Fuzz handshake decoding - any accepted input must re-encode byte for byte
    if let Ok(packet) = handshake::decode(data) {
        assert_eq!(packet.to_bytes(), data);
    }
});
