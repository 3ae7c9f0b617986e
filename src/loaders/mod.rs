pub mod points;
pub mod ros2;
pub mod trajectory;

pub use points::{load_map_points, parse_map_points};
pub use ros2::{MapMode, Negate, RosMapMetadata, load_occupancy_grid};
pub use trajectory::{TrajectoryPose, load_tum_trajectory, parse_tum_trajectory};
