pub mod grid2d;
pub mod index;
pub mod merge;

pub use grid2d::{Grid2d, OccupancyGrid};
pub use index::{to_cell_index, world_to_cell};
pub use merge::merge_occupied;
