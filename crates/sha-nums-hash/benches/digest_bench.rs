//! Benchmarks for the SHA-256 pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sha_nums_hash::{derive_k, Sha256};

fn bench_short_password(c: &mut Criterion) {
    let sha = Sha256::new().unwrap();
    c.bench_function("digest_password", |b| {
        b.iter(|| sha.digest(black_box(b"correct horse battery staple")))
    });
}

fn bench_message_sizes(c: &mut Criterion) {
    let sha = Sha256::new().unwrap();
    let mut group = c.benchmark_group("digest_size");

    for size in [64usize, 1024, 16 * 1024] {
        let data = vec![0xa5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| sha.digest(black_box(data)))
        });
    }
    group.finish();
}

fn bench_constant_derivation(c: &mut Criterion) {
    c.bench_function("derive_k", |b| b.iter(derive_k));
}

criterion_group!(
    benches,
    bench_short_password,
    bench_message_sizes,
    bench_constant_derivation
);
criterion_main!(benches);
