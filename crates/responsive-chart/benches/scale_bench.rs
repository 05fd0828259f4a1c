use criterion::{black_box, criterion_group, criterion_main, Criterion};
use responsive_chart::ticks::{nice_domain, ticks};
use responsive_chart::{ColorScale, ColorScheme, ContinuousScale};

fn bench_scales(c: &mut Criterion) {
    let mut group = c.benchmark_group("scales");
    let values: Vec<f64> = (0..10_000).map(|i| i as f64 * 0.37 - 1_200.0).collect();

    let linear = ContinuousScale::linear((-1_200.0, 2_500.0), (0.0, 800.0)).nice(10.0);
    group.bench_function("linear_map_10k", |b| {
        b.iter(|| values.iter().filter_map(|v| linear.map(*v)).sum::<f64>())
    });

    let sqrt = ContinuousScale::sqrt((0.0, 2_500.0), (2.0, 18.0));
    group.bench_function("sqrt_map_10k", |b| {
        b.iter(|| values.iter().filter_map(|v| sqrt.map(v.abs())).sum::<f64>())
    });

    let color = ColorScale::new(ColorScheme::Spectral, Some((-1_200.0, 2_500.0)));
    group.bench_function("spectral_map_10k", |b| {
        b.iter(|| values.iter().filter_map(|v| color.map(*v)).map(|c| c.r as u32).sum::<u32>())
    });

    group.bench_function("nice_and_ticks", |b| {
        b.iter(|| {
            let (lo, hi) = nice_domain(black_box(0.123), black_box(987.6), 10.0);
            ticks(lo, hi, 10.0)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_scales);
criterion_main!(benches);
