//! Criterion benchmarks for u-mlst.
//!
//! Uses synthetic grid instances with cycling labels to measure tree
//! construction and full search cost independent of any dataset.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_mlst::graph::{Edge, GraphInstance};
use u_mlst::mlst::{EvolutionEngine, MlstConfig, SpanningTreeBuilder};
use u_mlst::random::create_rng;

// ===========================================================================
// Grid instance: w × h lattice, labels cycling over `labels` values
// ===========================================================================

fn grid(w: u32, h: u32, labels: u32) -> GraphInstance {
    let id = |x: u32, y: u32| y * w + x;
    let mut edges = Vec::new();
    let mut next = 0;
    for y in 0..h {
        for x in 0..w {
            if x + 1 < w {
                edges.push(Edge::new(id(x, y), id(x + 1, y), next % labels));
                next += 1;
            }
            if y + 1 < h {
                edges.push(Edge::new(id(x, y), id(x, y + 1), next % labels));
                next += 1;
            }
        }
    }
    GraphInstance::from_edges(edges).expect("grid has nodes")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_dfs_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("dfs_tree");
    group.sample_size(20);

    for &side in &[10u32, 50, 100] {
        let instance = grid(side, side, 8);
        group.bench_with_input(BenchmarkId::from_parameter(side), &instance, |b, inst| {
            let mut rng = create_rng(42);
            b.iter(|| {
                let tree = SpanningTreeBuilder::build(0, black_box(inst.edges()), &mut rng);
                black_box(tree)
            })
        });
    }
    group.finish();
}

fn bench_engine_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_grid");
    group.sample_size(10);

    for (side, pop, gen) in [(10u32, 20usize, 50usize), (20, 30, 30), (40, 30, 10)] {
        let instance = grid(side, side, 6);
        let config = MlstConfig::default()
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_max_stagnant_generations(0)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("s{}_p{}_g{}", side, pop, gen), side),
            &(instance, config),
            |b, (inst, cfg)| {
                b.iter(|| {
                    let result = EvolutionEngine::new(black_box(inst), cfg.clone())
                        .and_then(|engine| engine.run());
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_dfs_tree, bench_engine_grid);
criterion_main!(benches);
