use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dandelion_core::rng::RngHandle;
use dandelion_graph::gen_random_ktree;

fn sample_ktree_bench(c: &mut Criterion) {
    c.bench_function("sample_ktree_5k_k4", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            let graph = gen_random_ktree(5_000, 4, &mut rng).unwrap();
            black_box(graph);
        });
    });
}

criterion_group!(benches, sample_ktree_bench);
criterion_main!(benches);
