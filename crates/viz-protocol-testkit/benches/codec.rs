use criterion::{black_box, criterion_group, criterion_main, Criterion};
use viz_protocol_core::{from_wire_bytes, to_wire_bytes, ChainId, PrivateKey};
use viz_protocol_ops::Transaction;
use viz_protocol_testkit::vectors::{transaction_from_vector, TRANSFER_VECTOR};

fn codec(c: &mut Criterion) {
    let tx = transaction_from_vector(&TRANSFER_VECTOR);
    let bytes = to_wire_bytes(&tx).unwrap();
    let json = serde_json::to_string(&tx).unwrap();

    c.bench_function("transaction_encode", |b| {
        b.iter(|| to_wire_bytes(black_box(&tx)).unwrap())
    });
    c.bench_function("transaction_decode", |b| {
        b.iter(|| from_wire_bytes::<Transaction>(black_box(&bytes)).unwrap())
    });
    c.bench_function("transaction_json_parse", |b| {
        b.iter(|| serde_json::from_str::<Transaction>(black_box(&json)).unwrap())
    });
}

fn signing(c: &mut Criterion) {
    let tx = transaction_from_vector(&TRANSFER_VECTOR);
    let key = PrivateKey::from_seed(TRANSFER_VECTOR.signer_seed).unwrap();
    let digest = tx.digest(&ChainId::MAINNET).unwrap();
    let signature = key.sign(&digest).unwrap();

    c.bench_function("digest", |b| {
        b.iter(|| black_box(&tx).digest(&ChainId::MAINNET).unwrap())
    });
    c.bench_function("sign", |b| b.iter(|| key.sign(black_box(&digest)).unwrap()));
    c.bench_function("recover", |b| {
        b.iter(|| black_box(&signature).recover(&digest).unwrap())
    });
}

criterion_group!(benches, codec, signing);
criterion_main!(benches);
