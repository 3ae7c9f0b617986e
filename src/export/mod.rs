pub mod ply;
pub mod ros_map;

pub use ply::{save_point_cloud, save_trajectory, write_point_cloud_ply, write_trajectory_ply};
pub use ros_map::{SavedMap, map_metadata, save_occupancy_grid, write_pgm};
