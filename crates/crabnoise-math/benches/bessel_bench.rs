use criterion::{criterion_group, criterion_main, Criterion};
use crabnoise_math::bessel::{bessel_i0e, bessel_ive_orders};
use std::hint::black_box;

fn bench_i0e(c: &mut Criterion) {
    c.bench_function("i0e_x10", |b| b.iter(|| bessel_i0e(black_box(10.0))));
    c.bench_function("i0e_x2500", |b| b.iter(|| bessel_i0e(black_box(2500.0))));
}

fn bench_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("ive_orders");

    group.bench_function("ascending_x0.5_n32", |b| {
        b.iter(|| bessel_ive_orders(black_box(0.5), 32))
    });
    group.bench_function("miller_x1.34_n64", |b| {
        b.iter(|| bessel_ive_orders(black_box(1.34), 64))
    });
    group.bench_function("miller_x2500_n448", |b| {
        b.iter(|| bessel_ive_orders(black_box(2500.0), 448))
    });
    group.bench_function("hankel_x1e10_n1000", |b| {
        b.iter(|| bessel_ive_orders(black_box(1e10), 1000))
    });

    group.finish();
}

criterion_group!(benches, bench_i0e, bench_orders);
criterion_main!(benches);
