pub mod accumulator;
pub mod config;
pub mod export;
pub mod grid;
pub mod iterators;
pub mod loaders;
pub mod pipeline;
pub mod plane;
pub mod types;
pub mod visualization;

pub use accumulator::{AccumulationStats, OccupancyAccumulator};
pub use config::{MapperConfig, PlaneBasis};
pub use grid::{Grid2d, OccupancyGrid};
pub use loaders::{load_map_points, load_occupancy_grid, load_tum_trajectory};
pub use pipeline::{GridMap, build_grid_map};
pub use plane::Plane;
pub use types::{GridBounds, MapError, MapInfo, MapPoint, ProjectedPoint};
pub use visualization::ImageLayout;
