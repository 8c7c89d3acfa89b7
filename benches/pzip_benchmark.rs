use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pzip_rs::pzip::{ALPHABET_LEN, Run, ZipOptions, encode_slice, pzip, zip_to_vec};

/// Lowercase text with runs of 1-8 identical bytes.
fn generate_text(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let c = b'a' + (state % 26) as u8;
        let n = 1 + ((state >> 8) % 8) as usize;
        for _ in 0..n.min(len - data.len()) {
            data.push(c);
        }
    }
    data
}

fn bench_encode_slice(c: &mut Criterion) {
    let data = generate_text(1024 * 1024);
    let mut out = Vec::with_capacity(data.len());
    c.bench_function("encode_slice_1MB", |b| {
        b.iter(|| {
            out.clear();
            encode_slice(black_box(&data), &mut out);
            out.len()
        })
    });
}

fn bench_pzip_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("pzip_threads");
    for size_mb in [1, 16] {
        let data = generate_text(size_mb * 1024 * 1024);
        let mut runs = vec![Run::default(); data.len()];
        let mut frequency = [0usize; ALPHABET_LEN];
        let mut count = 0usize;
        group.throughput(Throughput::Bytes(data.len() as u64));
        for threads in [1, 2, 4, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("{}MB", size_mb), threads),
                &threads,
                |b, &threads| {
                    b.iter(|| {
                        pzip(
                            threads,
                            black_box(&data),
                            &mut runs,
                            &mut count,
                            &mut frequency,
                        )
                        .unwrap();
                        count
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_zip_to_vec(c: &mut Criterion) {
    let data = generate_text(4 * 1024 * 1024);
    let options = ZipOptions::default();
    c.bench_function("zip_to_vec_4MB_default_threads", |b| {
        b.iter(|| zip_to_vec(&options, black_box(&data)).unwrap().runs.len())
    });
}

criterion_group!(benches, bench_encode_slice, bench_pzip_threads, bench_zip_to_vec);
criterion_main!(benches);
