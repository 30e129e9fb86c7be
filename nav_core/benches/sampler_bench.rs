use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point2;
use nav_core::{ControllerParams, PathSampler, Vehicle};

fn bench_cloud(n: usize) -> Vec<Point2<f64>> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            Point2::new(0.5 + t * 6.0, (t * std::f64::consts::TAU).sin() * 0.8)
        })
        .collect()
}

fn bench_sweep(c: &mut Criterion) {
    let vehicle = Vehicle::new(0.28, 0.5, 0.32, 1.0, 4.0, 1.0).unwrap();
    let params = ControllerParams::new(0.05, 0.05, 0.5, 0.02).unwrap();
    let sampler = PathSampler::new(&vehicle, params);

    let mut group = c.benchmark_group("path_sampler_generate_command");
    for &n in &[0usize, 8, 32, 128] {
        let cloud = bench_cloud(n);
        group.bench_function(format!("cloud_{n}"), |b| {
            b.iter(|| sampler.generate_command(black_box(&cloud), black_box(0.6)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
