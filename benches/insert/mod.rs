use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use ordavl::AvlTree;

use crate::KeyGen;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    tree: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.tree), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, "map", AvlTree::new, n_values);
        bench_param(&mut g, "multimap", AvlTree::multimap, n_values);
    }
}

/// Measure the time needed to insert `n_values` number of randomly generated
/// keys into an empty tree built by `new_tree`.
///
/// Keys are drawn from a reduced domain so the multimap accumulates duplicate
/// groups as the tree grows.
fn bench_param<M, F>(g: &mut BenchmarkGroup<'_, M>, tree: &'static str, new_tree: F, n_values: usize)
where
    M: Measurement,
    F: Fn() -> AvlTree<u16, usize> + Copy,
{
    let bench_name = BenchName { tree, n_values };
    g.throughput(Throughput::Elements(n_values as _)); // Keys inserted per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (new_tree(), KeyGen::new(4_096)),
            |(mut t, mut keys)| {
                for _i in 0..n_values {
                    t.insert(keys.key(), 42_usize);
                }
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });
}
