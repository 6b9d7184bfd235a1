// Signing & verification benchmarks for RBAC transaction assembly.
//
// Covers keypair generation and raw signing for both schemes, the full
// create-user pipeline, and batch verification at various sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rbac_protocol::crypto::{verify, Ed25519Keypair, KeyPair, Secp256k1Keypair, SignatureScheme, Signer};
use rbac_protocol::transaction::{assemble_batch, verify_batch, CreateUserPipeline, NewUser};

const SCHEMES: [SignatureScheme; 2] = [SignatureScheme::Secp256k1, SignatureScheme::Ed25519];

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("secp256k1/keypair_generate", |b| {
        b.iter(Secp256k1Keypair::generate);
    });
    c.bench_function("ed25519/keypair_generate", |b| {
        b.iter(Ed25519Keypair::generate);
    });
}

fn bench_sign_and_verify(c: &mut Criterion) {
    let message = b"create user alice; manager 03cd";

    for scheme in SCHEMES {
        let key = KeyPair::generate(scheme);
        let public_key = key.public_key_hex();
        let signature = key.sign_hex(message).unwrap();

        c.bench_function(&format!("{scheme}/sign_message"), |b| {
            b.iter(|| key.sign(message).unwrap());
        });
        c.bench_function(&format!("{scheme}/verify_signature"), |b| {
            b.iter(|| verify(&public_key, message, &signature));
        });
    }
}

fn bench_create_user(c: &mut Criterion) {
    let txn_key = Secp256k1Keypair::generate();
    let batch_key = Secp256k1Keypair::generate();
    let pipeline = CreateUserPipeline::new();
    let user = NewUser::new("alice", "02ab", "{\"dept\":\"eng\"}").manager("03cd");

    c.bench_function("pipeline/create_user", |b| {
        b.iter(|| pipeline.create_user(&txn_key, &batch_key, &user).unwrap());
    });
}

fn bench_verify_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/verify_batch");
    let txn_key = Secp256k1Keypair::generate();
    let batch_key = Secp256k1Keypair::generate();
    let pipeline = CreateUserPipeline::new();

    for size in [1usize, 10, 50] {
        let txns = (0..size)
            .map(|i| {
                let user = NewUser::new(format!("user-{i}"), format!("02{i:04x}"), "");
                pipeline
                    .build_transaction(&user, &txn_key, &batch_key.public_key_hex())
                    .unwrap()
            })
            .collect();
        let (batch, _) = assemble_batch(txns, &batch_key).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| verify_batch(batch).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_sign_and_verify,
    bench_create_user,
    bench_verify_batch,
);
criterion_main!(benches);
