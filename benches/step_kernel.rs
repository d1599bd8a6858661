//! Benchmarks for the CPU step kernel.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;

use rdfield::brush::BrushStamp;
use rdfield::grid::Grid;
use rdfield::kernel;
use rdfield::params::KernelParams;
use rdfield::Simulation;

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for size in [128u32, 256, 512] {
        group.bench_with_input(BenchmarkId::new("grid", size), &size, |b, &size| {
            let mut grid = Grid::new(size, size, 0.06).unwrap();
            let params = KernelParams::default();
            b.iter(|| {
                let width = grid.width();
                let height = grid.height();
                let (src, dst) = grid.buffers_mut();
                kernel::step(black_box(src), dst, width, height, &params, None);
                grid.swap();
            })
        });
    }

    group.finish();
}

fn bench_step_with_brush(c: &mut Criterion) {
    let mut grid = Grid::new(256, 256, 0.06).unwrap();
    let params = KernelParams::default();
    let stamp = BrushStamp {
        position: Vec2::new(0.5, 0.5),
        radius: 0.03,
        strength: 0.9,
    };

    c.bench_function("step_with_brush_256", |b| {
        b.iter(|| {
            let width = grid.width();
            let height = grid.height();
            let (src, dst) = grid.buffers_mut();
            kernel::step(black_box(src), dst, width, height, &params, Some(stamp));
            grid.swap();
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut engine = Simulation::new()
        .with_resolution(256, 256)
        .with_steps_per_frame(30)
        .with_log_interval(0)
        .build()
        .unwrap();

    c.bench_function("advance_frame_256x30", |b| {
        b.iter(|| {
            engine.advance_frame();
            black_box(engine.tick())
        })
    });
}

criterion_group!(benches, bench_step, bench_step_with_brush, bench_frame);
criterion_main!(benches);
