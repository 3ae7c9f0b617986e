use criterion::{Criterion, black_box, criterion_group, criterion_main};

use pcl2grid::types::MapPoint;
use pcl2grid::{GridBounds, MapperConfig, OccupancyAccumulator, PlaneBasis, Plane, build_grid_map};

/// A noisy, slightly tilted spiral walk of `n` points, similar in spread to a
/// room-scale map-point dump.
fn spiral(n: usize) -> Vec<MapPoint> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.05;
            let r = 2.0 + 0.02 * i as f64;
            let x = r * t.cos();
            let y = r * t.sin();
            let z = 0.1 * x - 0.05 * y + 0.01 * (i % 7) as f64;
            MapPoint::new(i as i64, x, y, z)
        })
        .collect()
}

fn bench_build_grid(c: &mut Criterion) {
    let points = spiral(20_000);
    let config = MapperConfig {
        grid_size: [1000, 1000],
        cell_size: 0.1,
        basis: PlaneBasis::Aligned,
    };

    c.bench_function("plane_fit_20k", |b| {
        b.iter(|| black_box(Plane::fit(black_box(&points)).expect("plane should fit")));
    });

    let plane = Plane::fit(&points).expect("plane should fit");
    let projected = plane.project(&points);
    let bounds = GridBounds::from_points(&projected);
    let accumulator = OccupancyAccumulator::new(config.grid_size, config.cell_size)
        .expect("config should be valid");

    c.bench_function("accumulate_20k", |b| {
        b.iter(|| black_box(accumulator.build(&projected, bounds).expect("grid should build")));
    });

    c.bench_function("build_grid_map_20k", |b| {
        b.iter(|| black_box(build_grid_map(&points, &config).expect("grid should build")));
    });
}

criterion_group!(benches, bench_build_grid);
criterion_main!(benches);
