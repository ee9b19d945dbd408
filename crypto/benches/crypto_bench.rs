use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn sha256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("sha256_256B", |b| {
        b.iter(|| doppelcheck_crypto::sha256(black_box(&data)))
    });
}

fn sha256_1kb_bench(c: &mut Criterion) {
    let data = vec![0xCDu8; 1024];

    c.bench_function("sha256_1KB", |b| {
        b.iter(|| doppelcheck_crypto::sha256(black_box(&data)))
    });
}

fn canonical_link_bench(c: &mut Criterion) {
    let link = json!({
        "claim": {"text": "The sky is blue", "type": "statement"},
        "sources": [
            {"url": "https://example.org/a", "content": "x".repeat(512), "type": "web", "validated": true},
            {"url": "https://example.org/b", "content": "y".repeat(512), "type": "web", "validated": true},
        ],
        "metrics": {
            "source_reliability": 0.9,
            "claim_consistency": 0.85,
            "evidence_quality": 0.9,
            "verification_confidence": 0.0,
        },
        "prev_hash": doppelcheck_crypto::genesis_hash().to_hex(),
    });

    c.bench_function("hash_canonical_link", |b| {
        b.iter(|| doppelcheck_crypto::hash_canonical(black_box(&link)))
    });
}

criterion_group!(
    benches,
    sha256_bench,
    sha256_1kb_bench,
    canonical_link_bench,
);
criterion_main!(benches);
