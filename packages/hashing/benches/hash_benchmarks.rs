//! Throughput benchmarks for the FNV-1a variants and the key hashes built on them

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use khash_hashing::api::Hash;
use khash_hashing::{get_hash, get_hash_beansdb, get_hash_bugfree, khash64, vhash};
use std::hint::black_box;
use tokio::runtime::Runtime;

/// Benchmark the three entry points over typical key and value sizes
fn benchmark_entry_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("fnv1a_throughput");

    // Keys are short; values run up to the vhash window size and beyond
    let sizes = [16, 256, 1024, 65536];

    for size in &sizes {
        group.throughput(Throughput::Bytes(*size as u64));

        // No zero bytes, so the legacy variant walks the whole input too
        let data: Vec<u8> = (0..*size).map(|i| (i % 255 + 1) as u8).collect();

        group.bench_with_input(BenchmarkId::new("get_hash", size), &data, |b, data| {
            b.iter(|| black_box(get_hash(black_box(data))));
        });
        group.bench_with_input(
            BenchmarkId::new("get_hash_bugfree", size),
            &data,
            |b, data| {
                b.iter(|| black_box(get_hash_bugfree(black_box(data))));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("get_hash_beansdb", size),
            &data,
            |b, data| {
                b.iter(|| black_box(get_hash_beansdb(black_box(data))));
            },
        );
    }
    group.finish();
}

/// Benchmark the composite key and value hashes
fn benchmark_key_hashes(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_hashes");
    let key = b"user:1234567890:profile".to_vec();
    let value = vec![0x5au8; 4096];

    group.bench_function("khash64", |b| {
        b.iter(|| black_box(khash64(black_box(&key))));
    });
    group.bench_function("vhash_4k", |b| {
        b.iter(|| black_box(vhash(black_box(&value))));
    });
    group.finish();
}

/// Benchmark builder overhead against the direct call
fn benchmark_builder_overhead(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("builder_overhead");
    let data = vec![0x61u8; 1024];

    group.bench_function("builder_compute", |b| {
        b.iter(|| {
            rt.block_on(async {
                let hash = Hash::fnv1a()
                    .compute(data.clone())
                    .await
                    .expect("hash should succeed");
                black_box(hash);
            });
        });
    });

    group.bench_function("direct_call", |b| {
        b.iter(|| black_box(get_hash_bugfree(black_box(&data))));
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_entry_points,
    benchmark_key_hashes,
    benchmark_builder_overhead
);
criterion_main!(benches);
