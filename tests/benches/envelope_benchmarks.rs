//! # Secure Dispatch Benchmarks
//!
//! | Group | Operation |
//! |-------|-----------|
//! | `sd-02-secure` | `secure()` per policy branch and payload size |
//! | `shared-crypto` | AES-256-GCM encrypt, SHA-256 hash |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sd_02_envelope_security::{
    EnvelopeBuilder, EnvelopeSecurityApi, SecurityConfig, SecurityPolicyEngine,
};
use shared_crypto::{encrypt, sha256_hex, AesGcmSha256Provider, SecretKey};
use shared_types::{Envelope, Message, TrackerState};

fn payload(records: usize) -> String {
    let results: Vec<_> = (0..records)
        .map(|i| serde_json::json!({ "id": i, "name": format!("record-{}", i), "status": "active" }))
        .collect();
    serde_json::json!({ "results": results }).to_string()
}

fn envelope(body: &str) -> Envelope {
    let header = EnvelopeBuilder::build_header(&TrackerState {
        version: "1.0.0".into(),
        message_id: "bench".into(),
        action: "on-search".into(),
        ..TrackerState::default()
    });
    EnvelopeBuilder::build_envelope(header, Message::plaintext(body).unwrap())
}

fn bench_secure(c: &mut Criterion) {
    let mut group = c.benchmark_group("sd-02-secure");
    group.measurement_time(Duration::from_secs(5));

    let branches = [
        ("plain", false, false),
        ("encrypt_only", false, true),
        ("sign_only", true, false),
        ("encrypt_and_sign", true, true),
    ];

    for records in [1, 100, 1000] {
        let body = payload(records);
        group.throughput(Throughput::Bytes(body.len() as u64));

        for (name, sign, encrypt) in branches {
            let engine = SecurityPolicyEngine::new(
                SecurityConfig::new(sign, encrypt),
                Arc::new(AesGcmSha256Provider),
                Some(SecretKey::from_bytes([9; 32])),
            )
            .unwrap();

            group.bench_with_input(BenchmarkId::new(name, records), &body, |b, body| {
                b.iter(|| black_box(engine.secure(envelope(body)).unwrap()))
            });
        }
    }

    group.finish();
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto");
    let key = SecretKey::from_bytes([9; 32]);

    for size in [64usize, 4096, 65536] {
        let data = vec![0x5a_u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("aes_gcm_encrypt", size), &data, |b, data| {
            b.iter(|| black_box(encrypt(&key, data).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("sha256_hex", size), &data, |b, data| {
            b.iter(|| black_box(sha256_hex(data)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_secure, bench_primitives);
criterion_main!(benches);
