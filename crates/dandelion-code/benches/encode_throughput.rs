use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dandelion_code::{decode, encode_with_root_set};
use dandelion_core::rng::RngHandle;
use dandelion_graph::gen_random_ktree;

fn encode_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(42);
    let graph = gen_random_ktree(5_000, 4, &mut rng).unwrap();
    c.bench_function("encode_5k_k4", |b| {
        b.iter(|| {
            let code = encode_with_root_set(black_box(&graph), 5_000, 4).unwrap();
            black_box(code);
        });
    });
}

fn decode_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(42);
    let graph = gen_random_ktree(5_000, 4, &mut rng).unwrap();
    let code = encode_with_root_set(&graph, 5_000, 4).unwrap();
    c.bench_function("decode_5k_k4", |b| {
        b.iter(|| {
            let restored = decode(black_box(&code)).unwrap();
            black_box(restored);
        });
    });
}

criterion_group!(benches, encode_bench, decode_bench);
criterion_main!(benches);
