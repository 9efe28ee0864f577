//! Benchmark for sequential versus parallel maps.
//!
//! Each element runs a CPU-bound mixing loop so the cost per task is large
//! enough for the rayon pool to pay off. Compares:
//!
//! 1. `sequence::map`
//! 2. `parallel::map_async` (ordered, blocks until done)
//! 3. `parallel::map_chan` drained with `unbuffer_channel`
//!
//! Requires the `parallel` feature to be enabled.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use functools::parallel::{map_async, map_chan};
use functools::sequence::map;
use functools::stream::unbuffer_channel;
use std::hint::black_box;

/// Runs 64 rounds of a SHA-256-like mixing step.
#[inline(never)]
fn mix(input: u64) -> u64 {
    let mut state = [input, 0x6a09_e667_bb67_ae85, 0x3c6e_f372_a54f_f53a, 0x510e_527f_9b05_688c];

    for round in 0..64u64 {
        let t1 = state[3]
            .wrapping_add(state[1].rotate_right(6) ^ state[1].rotate_right(11))
            .wrapping_add(round);
        let t2 = state[0].rotate_right(2) ^ state[0].rotate_right(13);

        state[3] = state[2];
        state[2] = state[1];
        state[1] = state[0].wrapping_add(t1);
        state[0] = t1.wrapping_add(t2);
    }

    state[0] ^ state[1] ^ state[2] ^ state[3]
}

fn benchmark_map_variants(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_variants");
    group.sample_size(50);

    for size in [1_000u64, 10_000, 100_000] {
        let input: Vec<u64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |bencher, _| {
            bencher.iter(|| black_box(map(|x| mix(*x), &input)));
        });

        group.bench_with_input(BenchmarkId::new("map_async", size), &size, |bencher, _| {
            bencher.iter(|| black_box(map_async(|x| mix(*x), &input)));
        });

        group.bench_with_input(BenchmarkId::new("map_chan", size), &size, |bencher, _| {
            bencher.iter(|| black_box(unbuffer_channel(map_chan(mix, input.clone()))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_map_variants);

criterion_main!(benches);
