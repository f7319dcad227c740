use criterion::{criterion_group, criterion_main, Criterion};
use peer_wire::protocol::handshake;

#[allow(clippy::unwrap_used)]
fn bench_handshake(c: &mut Criterion) {
    let mut group = c.benchmark_group("handshake");
    let info_hash = [0x5Au8; 20];
    let peer_id = *b"-PW0100-bench0000001";

    group.bench_function("encode", |b| {
        b.iter(|| handshake::encode(&info_hash, &peer_id).unwrap())
    });

    let bytes = handshake::encode(&info_hash, &peer_id).unwrap();
    group.bench_function("decode", |b| b.iter(|| handshake::decode(&bytes).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_handshake);
criterion_main!(benches);
