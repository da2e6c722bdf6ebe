//! Performance benchmarks for FolderHash
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use folderhash::config::{HashAlgorithm, HashOptions};
use folderhash::diagnostics::CollectingSink;
use folderhash::hash::{hash_bytes, hash_folder_with};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

/// Create a test file of the specified size
fn create_test_file(dir: &std::path::Path, name: &str, size: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();

    let chunk_size = 64 * 1024;
    let chunk: Vec<u8> = (0..chunk_size).map(|i| (i % 256) as u8).collect();
    let mut remaining = size;

    while remaining > 0 {
        let to_write = remaining.min(chunk_size);
        file.write_all(&chunk[..to_write]).unwrap();
        remaining -= to_write;
    }

    path
}

fn bench_many_small_files(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();

    // 10 directories of 50 small files
    for d in 0..10 {
        let sub = dir.path().join(format!("dir_{}", d));
        std::fs::create_dir(&sub).unwrap();
        for i in 0..50 {
            create_test_file(&sub, &format!("file_{}.txt", i), 1024);
        }
    }

    let options = HashOptions::default();
    c.bench_function("hash_500_small_files", |b| {
        b.iter(|| {
            let sink = CollectingSink::new();
            black_box(hash_folder_with(dir.path(), &options, &sink).unwrap());
        });
    });
}

fn bench_large_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_file_hash");

    for size in [1024 * 1024, 16 * 1024 * 1024].iter() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "large.bin", *size);

        group.throughput(Throughput::Bytes(*size as u64));
        for buffer_size in [4 * 1024, 64 * 1024, 1024 * 1024] {
            let options = HashOptions::default().with_buffer_size(buffer_size);
            group.bench_with_input(
                BenchmarkId::new(
                    humansize::format_size(buffer_size as u64, humansize::BINARY),
                    humansize::format_size(*size as u64, humansize::BINARY),
                ),
                size,
                |b, _| {
                    b.iter(|| {
                        let sink = CollectingSink::new();
                        black_box(hash_folder_with(dir.path(), &options, &sink).unwrap());
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_algorithms");
    let data: Vec<u8> = (0..1024 * 1024).map(|i| (i % 256) as u8).collect();

    group.throughput(Throughput::Bytes(data.len() as u64));

    for algorithm in HashAlgorithm::all() {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| black_box(hash_bytes(&data, algorithm)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_many_small_files,
    bench_large_file,
    bench_hash_algorithms
);

criterion_main!(benches);
