#![no_main]

use libfuzzer_sys::fuzz_target;
use peer_wire::protocol::message;

fuzz_target!(|data: &[u8]| {
    // Fuzz message decoding - test for panics and over-reads
    if let Ok(packet) = message::decode(data) {
        let encoded = message::encode(&packet);
        assert_eq!(&data[..encoded.len()], encoded.as_slice());
    }
});
