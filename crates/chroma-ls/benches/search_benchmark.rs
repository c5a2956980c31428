// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chroma_ls::config::SearchConfig;
use chroma_ls::counter::{BulkConflictCounter, ParallelConflictCounter, SequentialConflictCounter};
use chroma_ls::engine::ColoringSearch;
use chroma_ls::monitor::no_op::NoOpMonitor;
use chroma_model::coloring::Coloring;
use chroma_model::graph::Graph;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Uniform random graph without self loops; duplicates are kept.
fn random_graph(num_vertices: usize, num_edges: usize, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(num_edges);
    while edges.len() < num_edges {
        let u = rng.random_range(0..num_vertices);
        let v = rng.random_range(0..num_vertices);
        if u != v {
            edges.push((u, v));
        }
    }
    Graph::new(num_vertices, edges).expect("generated edges are in range")
}

const SIZES: [(usize, usize, usize); 3] = [(250, 1_000, 8), (1_000, 8_000, 16), (4_000, 40_000, 24)];

fn bench_search_steps(c: &mut Criterion) {
    const STEPS: u64 = 10_000;
    let mut group = c.benchmark_group("search_steps");
    group.throughput(Throughput::Elements(STEPS));

    for (n, m, k) in SIZES {
        let graph = random_graph(n, m, 7);
        // A budget without verification so every iteration does the same work.
        let config = SearchConfig::builder(k, STEPS)
            .with_min_hill_climb_streak(8)
            .build()
            .expect("benchmark configuration is valid");

        group.bench_with_input(BenchmarkId::new("vertices", n), &graph, |b, graph| {
            b.iter(|| {
                let mut search = ColoringSearch::new(
                    black_box(graph),
                    config.clone(),
                    ChaCha8Rng::seed_from_u64(11),
                    SequentialConflictCounter,
                );
                search.run(&mut NoOpMonitor);
                black_box(search.into_outcome())
            })
        });
    }
    group.finish();
}

fn bench_bulk_counters(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_recount");

    for (n, m, k) in SIZES {
        let graph = random_graph(n * 25, m * 25, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let coloring = Coloring::random(graph.num_vertices(), k, &mut rng);
        group.throughput(Throughput::Elements(graph.num_edges() as u64));

        let parallel = ParallelConflictCounter::new();
        let counters: [&dyn BulkConflictCounter; 2] = [&SequentialConflictCounter, &parallel];
        for counter in counters {
            group.bench_with_input(
                BenchmarkId::new(counter.name(), graph.num_edges()),
                &graph,
                |b, graph| b.iter(|| counter.count_conflicts(black_box(graph), black_box(&coloring))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_search_steps, bench_bulk_counters);
criterion_main!(benches);
