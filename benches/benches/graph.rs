// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_graph::{
    DescendingSort, Graph, GraphOrder, PathFinder, get_paths, topological_sort_ascending,
    topological_sort_ascending_with, topological_sort_descending,
};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_u32(&mut self, upper_exclusive: u32) -> u32 {
        if upper_exclusive == 0 {
            return 0;
        }
        self.next_u32() % upper_exclusive
    }
}

fn build_dag(n: u32, edges_per_node: u32, seed: u64) -> Graph<u32> {
    let mut graph = Graph::with_capacity(n as usize);
    let mut rng = Lcg::new(seed);

    // Ensure a DAG by only adding edges `from -> to` where `to < from`.
    for from in 1..n {
        let out = edges_per_node.min(from);
        let children: Vec<u32> = (0..out).map(|_| rng.gen_range_u32(from)).collect();
        graph.insert(from, children);
    }

    graph
}

/// A DAG whose lowest node points back at the highest, closing one long cycle.
fn build_cyclic(n: u32, edges_per_node: u32, seed: u64) -> Graph<u32> {
    let mut graph = build_dag(n, edges_per_node, seed);
    graph.insert(0, [n - 1]);
    graph.insert(n - 1, [0]);
    graph
}

fn bench_sorts(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_graph/sort");
    group.sample_size(50);

    for &(n, edges_per_node) in &[
        (256_u32, 1_u32),
        (256_u32, 4_u32),
        (4_096_u32, 1_u32),
        (4_096_u32, 4_u32),
    ] {
        let graph = build_dag(n, edges_per_node, 0x6AF0_0000_0000_0001);

        group.bench_function(format!("ascending(n={n},e={edges_per_node})"), |b| {
            b.iter(|| black_box(topological_sort_ascending(&graph)));
        });

        group.bench_function(
            format!("ascending_graph_order(n={n},e={edges_per_node})"),
            |b| {
                b.iter(|| black_box(topological_sort_ascending_with(&graph, &GraphOrder)));
            },
        );

        group.bench_function(format!("descending(n={n},e={edges_per_node})"), |b| {
            b.iter(|| black_box(topological_sort_descending(&graph)));
        });

        group.bench_function(
            format!("descending_lazy_sum(n={n},e={edges_per_node})"),
            |b| {
                b.iter(|| {
                    let sum: u64 =
                        DescendingSort::new(&graph).fold(0_u64, |acc, k| acc + u64::from(k));
                    black_box(sum);
                });
            },
        );

        group.bench_function(
            format!("ascending_cycle_detected(n={n},e={edges_per_node})"),
            |b| {
                b.iter_batched(
                    || build_cyclic(n, edges_per_node, 0x6AF0_0000_0000_0002),
                    |graph| {
                        let err = topological_sort_ascending(&graph).err();
                        black_box(err);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_graph/paths");
    group.sample_size(30);

    // Path counts grow exponentially with fan-out, so keep graphs forest-shaped.
    for &n in &[256_u32, 4_096_u32] {
        let graph = build_dag(n, 1, 0x6AF0_0000_0000_0003);

        group.bench_function(format!("elders(n={n})"), |b| {
            b.iter(|| black_box(get_paths(&graph, false)));
        });

        group.bench_function(format!("subtree(n={n})"), |b| {
            let finder = PathFinder::new().include_subtree(true);
            b.iter(|| black_box(finder.find(&graph)));
        });

        let cyclic = build_cyclic(n, 1, 0x6AF0_0000_0000_0004);
        group.bench_function(format!("cycle_graph(n={n})"), |b| {
            b.iter_batched(
                || topological_sort_ascending(&cyclic).err(),
                |err| {
                    let paths = err.map(|err| get_paths(&err.graph, false));
                    black_box(paths);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sorts, bench_paths);
criterion_main!(benches);
