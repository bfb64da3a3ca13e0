//! Benchmarks for the chart kernel hot paths.
//!
//! Run with: cargo bench --package chart-render --bench kernel_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use chart_render::clip::{clip_polygon, CohenSutherland};
use chart_render::contour::trace;
use chart_render::png::encode;
use chart_render::spline::{create_spline, Tension};
use chart_render::{Color, Point, Rect};

/// Generate a smooth sensor-like field with hills and valleys.
fn generate_smooth_field(cols: usize, rows: usize) -> Vec<f64> {
    let mut data = vec![0.0f64; cols * rows];
    for row in 0..rows {
        for col in 0..cols {
            let fx = col as f64 / cols as f64;
            let fy = row as f64 / rows as f64;
            let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;
            data[row * cols + col] = 50.0 + v1 + v2 + v3;
        }
    }
    data
}

fn axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

fn bench_contour_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("contour_trace");
    let levels: Vec<f64> = (0..10).map(|i| 10.0 + i as f64 * 8.0).collect();

    for size in [32usize, 128, 256] {
        let d = generate_smooth_field(size, size);
        let x = axis(size);
        let y = axis(size);

        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| trace(black_box(&d), &x, &y, &levels).unwrap());
        });
    }

    group.finish();
}

fn bench_png_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encode");
    let mut rng = rand::thread_rng();

    for size in [64usize, 256, 512] {
        let pixels: Vec<Color> = (0..size * size)
            .map(|_| Color::from_rgb(rng.gen(), rng.gen(), rng.gen()))
            .collect();

        group.throughput(Throughput::Bytes((size * size * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| encode(black_box(&pixels), size, size, 96).unwrap());
        });
    }

    group.finish();
}

fn bench_spline(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline");

    for count in [16usize, 256, 1024] {
        let points: Vec<Point> = (0..count)
            .map(|i| Point::new(i as f64, (i as f64 * 0.3).sin() * 10.0))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| create_spline(black_box(&points), &Tension::Uniform(0.5), false, 0.25).unwrap());
        });
    }

    group.finish();
}

fn bench_clipping(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let clipper = CohenSutherland::new(0.0, 100.0, 0.0, 100.0);
    let segments: Vec<(Point, Point)> = (0..1000)
        .map(|_| {
            (
                Point::new(rng.gen_range(-50.0..150.0), rng.gen_range(-50.0..150.0)),
                Point::new(rng.gen_range(-50.0..150.0), rng.gen_range(-50.0..150.0)),
            )
        })
        .collect();

    c.bench_function("clip_line_1000", |b| {
        b.iter(|| {
            for &(p0, p1) in &segments {
                black_box(clipper.clip_line(p0, p1));
            }
        });
    });

    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let polygon: Vec<Point> = (0..64)
        .map(|i| {
            let angle = i as f64 / 64.0 * std::f64::consts::TAU;
            Point::new(50.0 + angle.cos() * 80.0, 50.0 + angle.sin() * 80.0)
        })
        .collect();

    c.bench_function("clip_polygon_64", |b| {
        b.iter(|| clip_polygon(black_box(&bounds), &polygon).unwrap());
    });
}

criterion_group!(
    benches,
    bench_contour_trace,
    bench_png_encode,
    bench_spline,
    bench_clipping
);
criterion_main!(benches);
