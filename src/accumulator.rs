//! Rasterizes the path through consecutive projected points into an occupancy grid.
//!
//! Consecutive points are assumed to be adjacent and are joined by a straight
//! line of occupied cells, regardless of the distance between them. Cells that
//! fall outside the grid are dropped, never clamped; the grid is never resized.

use glam::IVec2;

use crate::grid::index::{check_cell_size, world_to_cell};
use crate::grid::OccupancyGrid;
use crate::iterators::LineIterator;
use crate::types::{GridBounds, MapError, MapInfo, OCCUPIED, ProjectedPoint};

/// Summary of one accumulation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulationStats {
    pub points: usize,
    /// Number of consecutive pairs rasterized.
    pub segments: usize,
    /// Rasterized cells that landed inside the grid (with repeats).
    pub marked_cells: usize,
    /// Rasterized cells that landed outside the grid.
    pub dropped_cells: usize,
    /// Input points whose own cell is outside the grid.
    pub dropped_points: usize,
}

impl AccumulationStats {
    fn absorb(&mut self, other: &Self) {
        self.segments += other.segments;
        self.marked_cells += other.marked_cells;
        self.dropped_cells += other.dropped_cells;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyAccumulator {
    grid_size: [u32; 2],
    cell_size: f64,
}

impl OccupancyAccumulator {
    pub fn new(grid_size: [u32; 2], cell_size: f64) -> Result<Self, MapError> {
        if grid_size[0] == 0 || grid_size[1] == 0 {
            return Err(MapError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                grid_size[0], grid_size[1]
            )));
        }
        check_cell_size(cell_size)?;
        Ok(Self {
            grid_size,
            cell_size,
        })
    }

    pub fn grid_size(&self) -> [u32; 2] {
        self.grid_size
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn map_info(&self, bounds: &GridBounds) -> MapInfo {
        MapInfo {
            width: self.grid_size[0],
            height: self.grid_size[1],
            resolution: self.cell_size,
            origin: bounds.min,
        }
    }

    fn cells(&self, projected: &[ProjectedPoint], bounds: &GridBounds) -> Vec<IVec2> {
        projected
            .iter()
            .map(|p| world_to_cell(p.position, bounds.min, self.cell_size))
            .collect()
    }

    /// Builds the grid with cell (0, 0) at `bounds.min`.
    ///
    /// A single point draws nothing and yields an all-free grid.
    pub fn build(
        &self,
        projected: &[ProjectedPoint],
        bounds: GridBounds,
    ) -> Result<(OccupancyGrid, AccumulationStats), MapError> {
        if projected.is_empty() {
            return Err(MapError::EmptyInput);
        }

        let mut grid = OccupancyGrid::empty(self.map_info(&bounds));
        let cells = self.cells(projected, &bounds);
        let mut stats = point_stats(&grid, &cells);
        stats.absorb(&rasterize_segments(&mut grid, &cells));

        log_stats(&stats);
        Ok((grid, stats))
    }

    /// Same result as [`build`](Self::build), with segments rasterized on the
    /// rayon pool. Each worker draws into its own grid; the partial grids are
    /// OR-merged at the end.
    #[cfg(feature = "rayon")]
    pub fn build_parallel(
        &self,
        projected: &[ProjectedPoint],
        bounds: GridBounds,
    ) -> Result<(OccupancyGrid, AccumulationStats), MapError> {
        use rayon::prelude::*;

        use crate::grid::merge_occupied;

        if projected.is_empty() {
            return Err(MapError::EmptyInput);
        }

        let info = self.map_info(&bounds);
        let cells = self.cells(projected, &bounds);
        let mut grid = OccupancyGrid::empty(info.clone());
        let mut stats = point_stats(&grid, &cells);

        let chunk = (cells.len() / rayon::current_num_threads()).max(1);
        // Chunks overlap by one point so no segment is lost at the seams.
        let partials: Vec<_> = (0..cells.len().saturating_sub(1))
            .step_by(chunk)
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|start| {
                let end = (start + chunk + 1).min(cells.len());
                let mut part = OccupancyGrid::empty(info.clone());
                let part_stats = rasterize_segments(&mut part, &cells[start..end]);
                (part, part_stats)
            })
            .collect();

        for (part, part_stats) in &partials {
            merge_occupied(&mut grid, part)?;
            stats.absorb(part_stats);
        }

        log_stats(&stats);
        Ok((grid, stats))
    }
}

fn point_stats(grid: &OccupancyGrid, cells: &[IVec2]) -> AccumulationStats {
    AccumulationStats {
        points: cells.len(),
        dropped_points: cells.iter().filter(|c| !grid.in_bounds(**c)).count(),
        ..Default::default()
    }
}

fn rasterize_segments(grid: &mut OccupancyGrid, cells: &[IVec2]) -> AccumulationStats {
    let mut stats = AccumulationStats::default();
    for pair in cells.windows(2) {
        stats.segments += 1;
        for cell in LineIterator::new(pair[0], pair[1]) {
            if grid.set_if_in_bounds(cell, OCCUPIED) {
                stats.marked_cells += 1;
            } else {
                stats.dropped_cells += 1;
            }
        }
    }
    stats
}

fn log_stats(stats: &AccumulationStats) {
    log::debug!(
        "rasterized {} segments from {} points, {} cells marked",
        stats.segments,
        stats.points,
        stats.marked_cells
    );
    if stats.dropped_cells > 0 {
        log::warn!(
            "{} rasterized cells ({} points) fell outside the grid and were dropped",
            stats.dropped_cells,
            stats.dropped_points
        );
    }
}
