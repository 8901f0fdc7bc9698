use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use navset::{OrderedSetView, OrderedTree};
use std::collections::BTreeSet;
use std::hint::black_box;
use std::ops::Bound;

const N: usize = 10_000;
// Sorted input walks a single spine, so keep it small.
const N_SORTED: usize = 1_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_add_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("add_random");

    group.bench_function(BenchmarkId::new("OrderedTree", N), |b| {
        b.iter(|| {
            let mut tree = OrderedTree::new();
            for &k in &keys {
                tree.add(k).unwrap();
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_add_ordered(c: &mut Criterion) {
    let keys = ordered_keys(N_SORTED);
    let mut group = c.benchmark_group("add_ordered");

    group.bench_function(BenchmarkId::new("OrderedTree", N_SORTED), |b| {
        b.iter(|| {
            let mut tree = OrderedTree::new();
            for &k in &keys {
                tree.add(k).unwrap();
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N_SORTED), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

// ─── Navigation Benchmarks ──────────────────────────────────────────────────

fn bench_floor_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: OrderedTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    // Probes fall between stored keys.
    let probes: Vec<i64> = keys.iter().map(|k| k + 1).collect();
    let mut group = c.benchmark_group("floor_random");

    group.bench_function(BenchmarkId::new("OrderedTree", N), |b| {
        b.iter(|| {
            for k in &probes {
                black_box(tree.floor(k).unwrap());
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            for k in &probes {
                black_box(set.range(..=k).next_back());
            }
        });
    });

    group.finish();
}

fn bench_higher_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: OrderedTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let mut group = c.benchmark_group("higher_random");

    group.bench_function(BenchmarkId::new("OrderedTree", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(tree.higher(k).unwrap());
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(set.range((Bound::Excluded(k), Bound::Unbounded)).next());
            }
        });
    });

    group.finish();
}

// ─── Iteration Benchmarks ───────────────────────────────────────────────────

fn bench_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: OrderedTree<i64> = keys.iter().copied().collect();
    let view = OrderedSetView::from(tree.clone()).descending_set();
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let mut group = c.benchmark_group("iterate_descending");

    group.bench_function(BenchmarkId::new("OrderedTree", N), |b| {
        b.iter(|| tree.descending_iter().sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("OrderedSetView", N), |b| {
        b.iter(|| view.iter().map(Result::unwrap).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| set.iter().rev().sum::<i64>());
    });

    group.finish();
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("OrderedTree", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<OrderedTree<i64>>(),
            |mut tree| {
                for k in &keys {
                    tree.remove(k).unwrap();
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for k in &keys {
                    set.remove(k);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(add_benches, bench_add_random, bench_add_ordered,);

criterion_group!(navigation_benches, bench_floor_random, bench_higher_random,);

criterion_group!(iterate_benches, bench_iterate,);

criterion_group!(remove_benches, bench_remove_random,);

criterion_main!(add_benches, navigation_benches, iterate_benches, remove_benches,);
