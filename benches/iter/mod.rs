use std::{hint::black_box, ops::ControlFlow};

use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use ordavl::{AvlTree, Direction};

use crate::{multimap, KeyGen};

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("iter");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let t = multimap(n_values, u16::MAX);

    bench_iter(n_values, g, &t);
    bench_range_ascending(n_values, g, &t);
    bench_range_descending(n_values, g, &t);
    bench_walk_range_ascending(n_values, g, &t);
    bench_walk_range_descending(n_values, g, &t);
    bench_count_range(n_values, g, &t);
    bench_delete_range(n_values, g, &t);
}

fn bench_iter<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &AvlTree<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "iter",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t {
                black_box(v);
            }
        })
    });
}

macro_rules! range_bench {
    (
        $direction:ident
    ) => {
        paste::paste! {
            fn [<bench_range_ $direction:lower>]<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &AvlTree<u16, usize>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: concat!("range_", stringify!([<$direction:lower>])),
                };

                g.throughput(Throughput::Elements(n_values as _));
                // Values per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        let iter = t.range(Direction::$direction, 4_096..32_768);
                        for v in iter {
                            black_box(v);
                        }
                    })
                });
            }

            fn [<bench_walk_range_ $direction:lower>]<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &AvlTree<u16, usize>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: concat!("walk_range_", stringify!([<$direction:lower>])),
                };

                g.throughput(Throughput::Elements(n_values as _));
                // Values per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        t.walk_range(Direction::$direction, 4_096..32_768, |k, v| {
                            black_box((k, v));
                            ControlFlow::Continue(())
                        });
                    })
                });
            }
        }
    };
}

range_bench!(Ascending);
range_bench!(Descending);

fn bench_count_range<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &AvlTree<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "count_range",
    };

    // Counts per second
    g.throughput(Throughput::Elements(1));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || KeyGen::new(u16::MAX),
            |mut keys| {
                let (a, b) = (keys.key(), keys.key());
                black_box(t.count_range(a.min(b)..a.max(b)))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_delete_range<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &AvlTree<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "delete_range",
    };

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || t.clone(),
            |mut t| {
                black_box(t.delete_range(4_096..32_768));
                t
            },
            BatchSize::LargeInput,
        )
    });
}
