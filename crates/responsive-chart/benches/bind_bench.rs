use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use responsive_chart::marks::TransitionConfig;
use responsive_chart::{
    Dataset, Dimensions, Encodings, Insets, MarkBinder, NodeKind, Record, ScaleFactory, Scene,
};

fn gen_weather(n: usize) -> Dataset {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let records = (0..n)
        .map(|i| {
            let t = i as f64;
            Record::new(start + chrono::Duration::days(i as i64))
                .with("dewPoint", 40.0 + (t * 0.017).sin() * 20.0)
                .with("humidity", 0.6 + (t * 0.031).cos() * 0.3)
                .with("temperatureMax", 60.0 + (t * 0.017).sin() * 25.0)
        })
        .collect();
    Dataset::new(records).unwrap_or_default()
}

fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind");
    let enc = Encodings::default();
    let dims = Dimensions::new(900.0, 900.0, Insets::scatter());
    for &n in &[365usize, 3_650usize] {
        let data = gen_weather(n);
        let scales = ScaleFactory::default().build(&data, &enc, &dims);

        group.bench_with_input(BenchmarkId::new("enter", n), &n, |b, _| {
            b.iter_batched(
                || {
                    let mut scene = Scene::new();
                    let parent = scene.append(scene.root(), NodeKind::Group, None);
                    (scene, parent, MarkBinder::new(TransitionConfig::default()))
                },
                |(mut scene, parent, mut binder)| {
                    black_box(binder.bind(&mut scene, parent, &data, &enc, &scales));
                },
                BatchSize::SmallInput,
            );
        });

        // Steady-state resize: every key is already bound.
        let mut scene = Scene::new();
        let parent = scene.append(scene.root(), NodeKind::Group, None);
        let mut binder = MarkBinder::new(TransitionConfig::default());
        binder.bind(&mut scene, parent, &data, &enc, &scales);
        scene.settle();
        let resized = ScaleFactory::default().build(&data, &enc, &Dimensions::new(600.0, 600.0, Insets::scatter()));
        group.bench_with_input(BenchmarkId::new("update", n), &n, |b, _| {
            b.iter(|| {
                black_box(binder.bind(&mut scene, parent, &data, &enc, &resized));
                black_box(binder.bind(&mut scene, parent, &data, &enc, &scales));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bind);
criterion_main!(benches);
