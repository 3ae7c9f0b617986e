//! Map metadata.

use glam::DVec2;

use crate::types::{DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE};

#[derive(Debug, Clone, PartialEq)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    /// Edge length of one cell in world units.
    pub resolution: f64,
    /// Corner of cell (0, 0) in plane coordinates.
    pub origin: DVec2,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE[0],
            height: DEFAULT_GRID_SIZE[1],
            resolution: DEFAULT_CELL_SIZE,
            origin: DVec2::ZERO,
        }
    }
}

impl MapInfo {
    pub fn square(width: u32, resolution: f64) -> Self {
        Self {
            width,
            height: width,
            resolution,
            ..Default::default()
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}
