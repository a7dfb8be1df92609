use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matspeed::{
    elementwise_accelerated, elementwise_baseline, sum_nested_loop, sum_reduce, Matrix,
};

fn bench_elementwise(c: &mut Criterion) {
    let a = Matrix::random_seeded(1000, 1000, Some(1));
    let b = Matrix::random_seeded(1000, 1000, Some(2));

    let mut group = c.benchmark_group("elementwise_1000x1000");
    group.bench_function("baseline", |bench| {
        bench.iter(|| elementwise_baseline(black_box(&a), black_box(&b)))
    });
    group.bench_function("accelerated", |bench| {
        bench.iter(|| elementwise_accelerated(black_box(&a), black_box(&b)))
    });
    group.finish();
}

fn bench_reduction(c: &mut Criterion) {
    let m = Matrix::random_seeded(500, 500, Some(3));

    let mut group = c.benchmark_group("sum_500x500");
    group.bench_function("reduce", |bench| bench.iter(|| sum_reduce(black_box(&m))));
    group.bench_function("nested_loop", |bench| bench.iter(|| sum_nested_loop(black_box(&m))));
    group.finish();
}

criterion_group!(benches, bench_elementwise, bench_reduction);
criterion_main!(benches);
