use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use perfphylo::compat::{ThreeStateSolver, two_state};
use perfphylo::model::StateCount;
use perfphylo::synthetic::SyntheticMatrixBuilder;
use std::hint::black_box;

/// (taxa, characters) of two-state matrices
const TWO_STATE_SIZES: &[(usize, usize)] = &[(100, 50), (1000, 200), (5000, 500)];

/// (taxa, characters) of three-state matrices; incompatible ones try all 3^c models
const THREE_STATE_SIZES: &[(usize, usize)] = &[(20, 6), (50, 8), (100, 10)];

const SEED: u64 = 2024;

fn two_state_decision(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_state");
    for &(taxa, characters) in TWO_STATE_SIZES {
        let compatible = SyntheticMatrixBuilder::new(taxa, characters).with_seed(SEED).build();
        let incompatible = SyntheticMatrixBuilder::new(taxa, characters)
            .with_seed(SEED)
            .incompatible()
            .build();
        let size = format!("{taxa}x{characters}");

        group.bench_with_input(BenchmarkId::new("compatible", &size), &compatible, |b, m| {
            b.iter(|| two_state::decide(black_box(m)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("incompatible", &size), &incompatible, |b, m| {
            b.iter(|| two_state::decide(black_box(m)).unwrap());
        });
    }
    group.finish();
}

fn three_state_search(c: &mut Criterion) {
    let sequential = ThreeStateSolver::new();
    let parallel = ThreeStateSolver::new().with_parallel_search();

    let mut group = c.benchmark_group("three_state");
    for &(taxa, characters) in THREE_STATE_SIZES {
        let incompatible = SyntheticMatrixBuilder::new(taxa, characters)
            .with_states(StateCount::Three)
            .with_seed(SEED)
            .incompatible()
            .build();
        let size = format!("{taxa}x{characters}");

        group.bench_with_input(BenchmarkId::new("sequential", &size), &incompatible, |b, m| {
            b.iter(|| sequential.solve(black_box(m)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("parallel", &size), &incompatible, |b, m| {
            b.iter(|| parallel.solve(black_box(m)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(regression, two_state_decision);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = three_state_search
}
criterion_main!(regression, reporting);
