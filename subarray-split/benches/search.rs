use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::hint::black_box;
use subarray_split::{enumerate, find_first, Splitter};

const SEED: u64 = 0xfeebdaed_deadbeef;

fn random_values(len: usize) -> Vec<i32> {
    let mut rng = SmallRng::seed_from_u64(SEED);
    (0..len).map(|_| rng.random_range(1..=20)).collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let reference = [10, 7, 2, 10, 5, 1, 1, 4, 1, 11, 5];
    c.bench_function("enumerate reference scenario", |b| {
        b.iter(|| enumerate(black_box(&reference), 3, 2))
    });

    let values = random_values(2_000);
    c.bench_function("find first on 2k random values", |b| {
        b.iter(|| find_first(black_box(&values), 8, 16))
    });

    c.bench_function("bounds on 2k random values", |b| {
        b.iter_batched(
            || values.clone(),
            |values| Splitter::new(&values, 8, 64).map(|splitter| splitter.bounds()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
