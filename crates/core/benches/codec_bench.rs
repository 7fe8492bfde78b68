use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use huffpack_core::{compress, decompress};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn text_input(len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let alphabet = b"eeeeeettttaaaooiinnsshhrrdlucmwfgypbvk     ";
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    let input = text_input(64 * 1024);
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("text_64k", |b| b.iter(|| compress(black_box(&input)).unwrap()));

    let uniform: Vec<u8> = (0..64 * 1024).map(|i| (i % 256) as u8).collect();
    group.bench_function("uniform_64k", |b| {
        b.iter(|| compress(black_box(&uniform)).unwrap())
    });
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let input = text_input(64 * 1024);
    let compressed = compress(&input).unwrap();
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("text_64k", |b| {
        b.iter(|| decompress(black_box(&compressed)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
