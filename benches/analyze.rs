use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use graph_golf::graph::Graph;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_regular_graph(order: usize, degree: usize, seed: u64) -> Graph {
    let mut graph = Graph::new(order, degree);
    let mut rng = StdRng::seed_from_u64(seed);
    graph.add_as_many_random_edges_as_possible(None, &mut rng);
    graph
}

fn analyze_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));
    group.warm_up_time(Duration::from_secs(2));

    for &(order, degree) in &[(50usize, 3usize), (200, 4), (500, 6)] {
        group.throughput(Throughput::Elements((order * (order - 1) / 2) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("order{order}_degree{degree}")),
            &(order, degree),
            |b, &(order, degree)| {
                b.iter_batched(
                    || random_regular_graph(order, degree, 7),
                    |mut graph| {
                        graph.analyze().expect("random regular graph stays connected");
                        std::hint::black_box(graph.diameter());
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn hops_cache_reuse_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_cached_rerun");
    group.sample_size(20);

    let mut graph = random_regular_graph(300, 4, 11);
    graph.analyze().expect("random regular graph stays connected");

    group.bench_function("analyze_already_clean", |b| {
        b.iter(|| {
            graph.analyze().expect("already analyzed graph stays Ok");
            std::hint::black_box(graph.diameter());
        });
    });

    group.finish();
}

criterion_group!(benches, analyze_group, hops_cache_reuse_group);
criterion_main!(benches);
