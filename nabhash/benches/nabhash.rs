use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nabhash::{Backend, NabHash};

const SIZES: [usize; 8] = [8, 64, 256, 1024, 4096, 8192, 16384, 65536];

fn bench_one_shot(c: &mut Criterion) {
    let input = vec![7u8; *SIZES.iter().max().unwrap_or(&0)];

    let mut g = c.benchmark_group("nabhash-one-shot");

    for backend in Backend::available() {
        for size in SIZES {
            g.throughput(Throughput::Bytes(size as u64));

            g.bench_with_input(BenchmarkId::new(backend.name(), size), &input[..size], |b, data| {
                b.iter(|| {
                    let mut hasher = NabHash::with_backend(backend).unwrap();
                    hasher.update(black_box(data));
                    black_box(hasher.finalize())
                })
            });
        }
    }

    g.finish();
}

fn bench_streaming(c: &mut Criterion) {
    // 64 KiB in uneven writes, exercising the staging buffer.
    let input = vec![7u8; 65536];

    let mut g = c.benchmark_group("nabhash-streaming");
    g.throughput(Throughput::Bytes(input.len() as u64));

    for backend in Backend::available() {
        g.bench_function(backend.name(), |b| {
            b.iter(|| {
                let mut hasher = NabHash::with_backend(backend).unwrap();
                for chunk in input.chunks(100) {
                    hasher.update(black_box(chunk));
                }
                black_box(hasher.finalize())
            })
        });
    }

    g.finish();
}

criterion_group!(benches, bench_one_shot, bench_streaming);
criterion_main!(benches);
