use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use glam::{DVec2, IVec2};

use pcl2grid::iterators::LineIterator;
use pcl2grid::types::{MapInfo, OCCUPIED};
use pcl2grid::OccupancyGrid;

fn bench_line_iterator(c: &mut Criterion) {
    let segments = build_segments();

    c.bench_function("line_iterator_steps_only", |b| {
        b.iter(|| {
            let mut steps = 0usize;
            for (start, end) in &segments {
                steps += LineIterator::new(*start, *end).count();
            }
            black_box(steps);
        });
    });

    c.bench_function("line_iterator_mark_cells", |b| {
        b.iter_batched(
            || build_empty_grid(256, 256, 0.05),
            |mut grid| {
                for (start, end) in &segments {
                    for cell in LineIterator::new(*start, *end) {
                        grid.set_if_in_bounds(cell, OCCUPIED);
                    }
                }
                black_box(grid);
            },
            BatchSize::SmallInput,
        );
    });
}

fn build_empty_grid(width: u32, height: u32, resolution: f64) -> OccupancyGrid {
    OccupancyGrid::empty(MapInfo {
        width,
        height,
        resolution,
        origin: DVec2::ZERO,
    })
}

/// Fan of segments from a few origins, partly leaving the 256 x 256 grid.
fn build_segments() -> Vec<(IVec2, IVec2)> {
    let mut segments = Vec::new();
    for i in 0..64 {
        let start = IVec2::new(2, 2 + i * 4);
        let end = IVec2::new(300, i * 6 - 40);
        segments.push((start, end));
    }
    segments.push((IVec2::new(40, 40), IVec2::new(-100, 60)));
    segments.push((IVec2::new(120, 20), IVec2::new(150, 290)));
    segments
}

criterion_group!(benches, bench_line_iterator);
criterion_main!(benches);
