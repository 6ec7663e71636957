use std::hint::black_box;

use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use ordavl::{AvlTree, Direction};

use crate::{multimap, KeyGen};

/// The number of queries issued per measured iteration.
const N_QUERIES: usize = 256;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    query: &'static str,
    n_values: usize,
    group_size: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(
            format!("{}/group_size_{}/n_values", v.query, v.group_size),
            v.n_values,
        )
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("query");

    for n_values in [1_000, 10_000, 50_000] {
        // Average number of entries sharing each key.
        for group_size in [1, 16] {
            bench_param(&mut g, n_values, group_size);
        }
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize, group_size: usize)
where
    M: Measurement,
{
    let domain = (n_values / group_size) as u16;
    let t = multimap(n_values, domain);

    let name = |query| BenchName {
        query,
        n_values,
        group_size,
    };

    g.throughput(Throughput::Elements(N_QUERIES as _)); // Queries per second

    g.bench_function(BenchmarkId::from(name("find_all")), |b| {
        run(b, domain, &t, |t, key| {
            for v in t.find_all(&key) {
                black_box(v);
            }
        })
    });

    g.bench_function(BenchmarkId::from(name("count_range")), |b| {
        run(b, domain, &t, |t, key| {
            black_box(t.count_range(key..key.saturating_add(64)));
        })
    });

    g.bench_function(BenchmarkId::from(name("rank")), |b| {
        run(b, domain, &t, |t, key| {
            black_box(t.rank(&key));
        })
    });

    g.bench_function(BenchmarkId::from(name("nth")), |b| {
        run(b, domain, &t, |t, key| {
            let index = key as usize * group_size;
            black_box(t.nth(Direction::Descending, index));
        })
    });
}

/// Issue [`N_QUERIES`] calls to `query`, each with a fresh key drawn from
/// `0..domain`.
fn run<M, F>(b: &mut criterion::Bencher<'_, M>, domain: u16, t: &AvlTree<u16, usize>, query: F)
where
    M: Measurement,
    F: Fn(&AvlTree<u16, usize>, u16),
{
    b.iter_batched(
        || KeyGen::new(domain),
        |mut keys| {
            for _ in 0..N_QUERIES {
                query(t, keys.key());
            }
        },
        BatchSize::SmallInput,
    )
}
