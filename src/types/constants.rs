pub const FREE: u8 = 0;
pub const OCCUPIED: u8 = 255;

/// Occupancy probability thresholds written to (and read from) map YAML files.
pub const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;
pub const DEFAULT_FREE_THRESH: f32 = 0.196;

pub const DEFAULT_GRID_SIZE: [u32; 2] = [1000, 1000];
pub const DEFAULT_CELL_SIZE: f64 = 0.1;
