use glam::UVec2;
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::grid::OccupancyGrid;
use crate::types::FREE;

/// How grid cells are laid out as image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageLayout {
    /// Pixel (row, col) is cell (x, y): the image is `height` columns wide and
    /// `width` rows tall, with no flip.
    #[default]
    Indexed,
    /// Map-viewer orientation: x along columns, grid row `y = 0` at the
    /// bottom of the image.
    Ros,
}

impl ImageLayout {
    /// Image `(width, height)` in pixels for a grid of `grid_width x grid_height` cells.
    pub fn image_dimensions(self, grid_width: u32, grid_height: u32) -> (u32, u32) {
        match self {
            Self::Indexed => (grid_height, grid_width),
            Self::Ros => (grid_width, grid_height),
        }
    }

    /// Pixel `(col, row)` holding cell `cell` of a grid `grid_height` cells tall.
    pub fn pixel_of(self, cell: UVec2, grid_height: u32) -> (u32, u32) {
        match self {
            Self::Indexed => (cell.y, cell.x),
            Self::Ros => (cell.x, grid_height - 1 - cell.y),
        }
    }
}

/// Convert an occupancy grid to a grayscale image, one pixel per cell.
///
/// Pixel values are the cell values: **OCCUPIED** (255) is white and
/// **FREE** (0) is black.
pub fn occupancy_grid_to_image(grid: &OccupancyGrid, layout: ImageLayout) -> GrayImage {
    let (width, height) = layout.image_dimensions(grid.width(), grid.height());
    let mut img = GrayImage::new(width, height);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = UVec2::new(x, y);
            let value = grid.get(cell).copied().unwrap_or(FREE);
            let (col, row) = layout.pixel_of(cell, grid.height());
            img.put_pixel(col, row, Luma([value]));
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use glam::{DVec2, IVec2};

    use super::*;
    use crate::types::{MapInfo, OCCUPIED};

    fn grid_3x2() -> OccupancyGrid {
        let info = MapInfo {
            width: 3,
            height: 2,
            resolution: 1.0,
            origin: DVec2::ZERO,
        };
        let mut grid = OccupancyGrid::empty(info);
        grid.set_if_in_bounds(IVec2::new(1, 0), OCCUPIED);
        grid.set_if_in_bounds(IVec2::new(2, 1), OCCUPIED);
        grid
    }

    #[test]
    fn indexed_rows_are_x() {
        let img = occupancy_grid_to_image(&grid_3x2(), ImageLayout::Indexed);
        // 3 cells along x become 3 rows, 2 cells along y become 2 columns.
        assert_eq!(img.dimensions(), (2, 3));

        // Cell (x, y) sits at column y, row x.
        assert_eq!(img.get_pixel(0, 1).0[0], OCCUPIED);
        assert_eq!(img.get_pixel(1, 2).0[0], OCCUPIED);
        let occupied = img.pixels().filter(|p| p.0[0] == OCCUPIED).count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn ros_flips_y() {
        let img = occupancy_grid_to_image(&grid_3x2(), ImageLayout::Ros);
        assert_eq!(img.dimensions(), (3, 2));

        // Image row 0 is grid row y = 1.
        assert_eq!(img.get_pixel(2, 0).0[0], OCCUPIED);
        assert_eq!(img.get_pixel(1, 1).0[0], OCCUPIED);
        assert_eq!(img.get_pixel(1, 0).0[0], FREE);
    }

    #[test]
    fn layout_serde_names() {
        let layout: ImageLayout = serde_yaml::from_str("ros").unwrap();
        assert_eq!(layout, ImageLayout::Ros);
        assert_eq!(serde_yaml::to_string(&ImageLayout::Indexed).unwrap().trim(), "indexed");
    }
}
