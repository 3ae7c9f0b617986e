//! End-to-end grid construction: fit, project, bound, accumulate.

use crate::accumulator::{AccumulationStats, OccupancyAccumulator};
use crate::config::MapperConfig;
use crate::grid::OccupancyGrid;
use crate::plane::Plane;
use crate::types::{GridBounds, MapError, MapPoint, ProjectedPoint};

/// Everything produced by one run of [`build_grid_map`].
#[derive(Debug, Clone)]
pub struct GridMap {
    pub grid: OccupancyGrid,
    pub plane: Plane,
    pub projected: Vec<ProjectedPoint>,
    pub bounds: GridBounds,
    pub stats: AccumulationStats,
}

pub fn build_grid_map(points: &[MapPoint], config: &MapperConfig) -> Result<GridMap, MapError> {
    config.validate()?;
    if points.is_empty() {
        return Err(MapError::EmptyInput);
    }

    let plane = Plane::fit_with_basis(points, config.basis)?;
    log::info!(
        "plane normal {:.4}, rms residual {:.4}",
        plane.normal(),
        plane.eigenvalues()[0].max(0.0).sqrt()
    );

    let projected = plane.project(points);
    let bounds = GridBounds::from_points(&projected);
    let extent = bounds.size() / config.cell_size;
    log::info!(
        "projected extent {:.2} x {:.2} cells, grid is {} x {}",
        extent.x,
        extent.y,
        config.grid_size[0],
        config.grid_size[1]
    );

    let accumulator = OccupancyAccumulator::new(config.grid_size, config.cell_size)?;
    let (grid, stats) = accumulator.build(&projected, bounds)?;
    log::info!(
        "{} of {} cells occupied, {} cells dropped",
        grid.occupied_count(),
        grid.info().cell_count(),
        stats.dropped_cells
    );

    Ok(GridMap {
        grid,
        plane,
        projected,
        bounds,
        stats,
    })
}
