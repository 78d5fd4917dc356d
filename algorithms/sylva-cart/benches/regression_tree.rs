use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, BenchmarkId, Criterion,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sylva::prelude::*;
use sylva_cart::{CrossValidatedTree, RegressionTree};
use sylva_datasets::generate;

fn configure(group: &mut BenchmarkGroup<WallTime>) {
    group
        .sample_size(20)
        .measurement_time(Duration::new(10, 0))
        .warm_up_time(Duration::new(3, 0))
        .noise_threshold(0.05);
}

fn regression_tree_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);

    // Controls how many samples are generated
    let training_set_sizes = &[100, 1000, 10000];
    let n_features = 4;

    let params = RegressionTree::params();

    let mut group = c.benchmark_group("regression_tree");
    configure(&mut group);

    for n in training_set_sizes.iter() {
        let dataset = generate::noisy_dataset(*n, n_features, &mut rng);

        group.bench_with_input(BenchmarkId::new("fit", n), &dataset, |b, d| {
            b.iter(|| params.fit(d))
        });

        let tree = params.fit(&dataset).unwrap();
        group.bench_with_input(BenchmarkId::new("prune", n), &tree, |b, tree| {
            b.iter(|| tree.prune())
        });
    }

    group.finish();
}

fn cross_validation_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let params = CrossValidatedTree::params().n_folds(10);

    let mut group = c.benchmark_group("cross_validation");
    configure(&mut group);

    for n in [200, 2000].iter() {
        let dataset = generate::noisy_dataset(*n, 3, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(n), &dataset, |b, d| {
            b.iter(|| params.fit(d))
        });
    }

    group.finish();
}

criterion_group!(benches, regression_tree_bench, cross_validation_bench);
criterion_main!(benches);
