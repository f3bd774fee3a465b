//! Operation Benchmarks
//!
//! Times each heap operation in isolation, plus a mixed workload, for both
//! heap variants over the same random keys.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_ops
//!
//! # Only one operation, or one heap
//! cargo bench --bench heap_ops -- 'decrease_key/'
//! cargo bench --bench heap_ops -- '/hollow'
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use mergeable_heaps::fibonacci::FibonacciHeap;
use mergeable_heaps::hollow::HollowHeap;
use mergeable_heaps::{DecreaseKeyHeap, Heap};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_keys(n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..n).map(|_| rng.gen_range(0..u64::MAX / 2)).collect()
}

fn filled<H: Heap<u64, u64>>(keys: &[u64]) -> (H, Vec<H::Handle>) {
    let mut heap = H::new();
    let handles = keys.iter().map(|&k| heap.insert(k, k)).collect();
    (heap, handles)
}

fn run_insert<H: Heap<u64, u64>>(keys: &[u64]) -> H {
    let mut heap = H::new();
    for &k in keys {
        heap.insert(k, k);
    }
    heap
}

fn run_delete_min<H: Heap<u64, u64>>(mut heap: H) -> u64 {
    let mut sum = 0u64;
    while let Some((k, _)) = heap.delete_min() {
        sum = sum.wrapping_add(k);
    }
    sum
}

fn run_delete<H: DecreaseKeyHeap<u64, u64>>((mut heap, handles): (H, Vec<H::Handle>)) -> usize {
    for handle in &handles {
        let _ = heap.delete(handle);
    }
    heap.len()
}

fn run_decrease_key<H: DecreaseKeyHeap<u64, u64>>(
    (mut heap, mut handles): (H, Vec<H::Handle>),
    seed: u64,
) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    handles.shuffle(&mut rng);
    for handle in &handles {
        if let Some((&key, _)) = heap.get(handle) {
            let _ = heap.decrease_key(handle, key / 2);
        }
    }
    heap.len()
}

/// A quarter of the keys are small and never touched; the rest are decreased,
/// deleted and popped in an interleaved pattern
fn run_mixed<H: DecreaseKeyHeap<u64, u64>>(keys: &[u64]) -> u64 {
    let mut rng = StdRng::seed_from_u64(7);
    let mut heap = H::new();
    for &k in &keys[..keys.len() / 4] {
        heap.insert(k / 1024, k);
    }
    let mut handles: Vec<H::Handle> = keys.iter().map(|&k| heap.insert(k, k)).collect();
    handles.shuffle(&mut rng);

    let mut sum = 0u64;
    for (i, handle) in handles.iter().enumerate() {
        match i % 4 {
            0 => {
                let _ = heap.delete(handle);
            }
            1 | 2 => {
                if let Some((&key, _)) = heap.get(handle) {
                    let _ = heap.decrease_key(handle, key - key / 8);
                }
            }
            _ => {
                if let Some((k, _)) = heap.delete_min() {
                    sum = sum.wrapping_add(k);
                }
            }
        }
    }
    sum
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in SIZES {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter(|| black_box(run_insert::<FibonacciHeap<u64, u64>>(keys)))
        });
        group.bench_with_input(BenchmarkId::new("hollow", n), &keys, |b, keys| {
            b.iter(|| black_box(run_insert::<HollowHeap<u64, u64>>(keys)))
        });
    }
    group.finish();
}

fn bench_delete_min(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_min");
    for n in SIZES {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter_batched(
                || run_insert::<FibonacciHeap<u64, u64>>(keys),
                |heap| black_box(run_delete_min(heap)),
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("hollow", n), &keys, |b, keys| {
            b.iter_batched(
                || run_insert::<HollowHeap<u64, u64>>(keys),
                |heap| black_box(run_delete_min(heap)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    for n in SIZES {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter_batched(
                || filled::<FibonacciHeap<u64, u64>>(keys),
                |input| black_box(run_delete(input)),
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("hollow", n), &keys, |b, keys| {
            b.iter_batched(
                || filled::<HollowHeap<u64, u64>>(keys),
                |input| black_box(run_delete(input)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for n in SIZES {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter_batched(
                || filled::<FibonacciHeap<u64, u64>>(keys),
                |input| black_box(run_decrease_key(input, 3)),
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("hollow", n), &keys, |b, keys| {
            b.iter_batched(
                || filled::<HollowHeap<u64, u64>>(keys),
                |input| black_box(run_decrease_key(input, 3)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(20);
    for n in SIZES {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter(|| black_box(run_mixed::<FibonacciHeap<u64, u64>>(keys)))
        });
        group.bench_with_input(BenchmarkId::new("hollow", n), &keys, |b, keys| {
            b.iter(|| black_box(run_mixed::<HollowHeap<u64, u64>>(keys)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_delete_min,
    bench_delete,
    bench_decrease_key,
    bench_mixed
);
criterion_main!(benches);
