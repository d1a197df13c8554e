use bitrel::{boolean_multiply, BoolMatrix};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::rngs::SmallRng;

struct Parameters((f64, usize));

fn random_relation(size: usize, sparsity: f64, rng: &mut SmallRng) -> BoolMatrix {
    BoolMatrix::from_fn(size, size, |_, _| rng.gen_bool(sparsity))
}

pub fn multiply_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("BoolMatrix::multiply");
    let mut rng = SmallRng::seed_from_u64(7);
    for sparsity in [0.5, 0.01] {
        for size in [64usize, 256usize, 1024usize] {
            group.sample_size(10);
            let parameters = Parameters((sparsity, size));
            group.bench_with_input(
                BenchmarkId::from_parameter(&parameters),
                &parameters,
                |bencher, parameters| {
                    let (sparsity, size) = parameters.0;
                    bencher.iter_batched(
                        || (random_relation(size, sparsity, &mut rng), random_relation(size, sparsity, &mut rng)),
                        |(left, right)| boolean_multiply(&left, &right),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

pub fn closure_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("BoolMatrix::reflexive_transitive_closure");
    let mut rng = SmallRng::seed_from_u64(11);
    // Support matrices of operators acting on 3 to 8 sites.
    for sparsity in [0.05, 0.005] {
        for size in [8usize, 32usize, 256usize] {
            group.sample_size(10);
            let parameters = Parameters((sparsity, size));
            group.bench_with_input(
                BenchmarkId::from_parameter(&parameters),
                &parameters,
                |bencher, parameters| {
                    let (sparsity, size) = parameters.0;
                    bencher.iter_batched(
                        || random_relation(size, sparsity, &mut rng),
                        |relation| relation.reflexive_transitive_closure(),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (sparsity, size) = self.0;
        write!(f, "(sparsity={sparsity}, size={size})")?;
        Ok(())
    }
}

criterion_group!(benches, multiply_benchmark, closure_benchmark);
criterion_main!(benches);
