use glam::{DVec2, IVec2, UVec2};

use crate::grid::index::world_to_cell;
use crate::types::{FREE, MapError, MapInfo, OCCUPIED};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    info: MapInfo,
    data: Vec<T>,
}

/// Binary occupancy grid: every cell is [`FREE`] or [`OCCUPIED`].
pub type OccupancyGrid = Grid2d<u8>;

impl<T> Grid2d<T> {
    pub fn new(info: MapInfo, data: Vec<T>) -> Result<Self, MapError> {
        let expected_len = info.cell_count();
        if data.len() != expected_len {
            return Err(MapError::InvalidMetadata(format!(
                "data length {} does not match map size {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Self { info, data })
    }

    /// Grid with every cell set to `value`.
    pub fn filled(info: MapInfo, value: T) -> Self
    where
        T: Clone,
    {
        let data = vec![value; info.cell_count()];
        Self { info, data }
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        // equivalent to (x >= 0 && x < width) for signed x
        (cell.x as u32) < self.info.width && (cell.y as u32) < self.info.height
    }

    pub fn get(&self, pos: UVec2) -> Option<&T> {
        if pos.x >= self.info.width || pos.y >= self.info.height {
            return None;
        }
        let idx = self.index(pos);
        Some(&self.data[idx])
    }

    pub fn set(&mut self, pos: UVec2, value: T) -> Result<(), MapError> {
        if pos.x >= self.info.width || pos.y >= self.info.height {
            return Err(MapError::InvalidMetadata(format!(
                "cell ({}, {}) out of bounds for map {}x{}",
                pos.x, pos.y, self.info.width, self.info.height
            )));
        }
        let idx = self.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    /// Writes `value` if `cell` lies inside the grid. Returns whether it was written.
    #[inline]
    pub fn set_if_in_bounds(&mut self, cell: IVec2, value: T) -> bool {
        if !self.in_bounds(cell) {
            return false;
        }
        let idx = self.index(cell.as_uvec2());
        self.data[idx] = value;
        true
    }

    fn index(&self, pos: UVec2) -> usize {
        (pos.y as usize) * (self.info.width as usize) + (pos.x as usize)
    }

    /// Corner of `cell` in plane coordinates.
    pub fn map_to_world(&self, cell: UVec2) -> DVec2 {
        self.info.origin + cell.as_dvec2() * self.info.resolution
    }

    /// Cell containing `pos`, or `None` when it falls outside the grid.
    pub fn world_to_map(&self, pos: DVec2) -> Option<UVec2> {
        let cell = world_to_cell(pos, self.info.origin, self.info.resolution);
        self.in_bounds(cell).then(|| cell.as_uvec2())
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl OccupancyGrid {
    /// All-free grid described by `info`.
    pub fn empty(info: MapInfo) -> Self {
        Self::filled(info, FREE)
    }

    pub fn is_occupied(&self, pos: UVec2) -> bool {
        self.get(pos).is_some_and(|&v| v == OCCUPIED)
    }

    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == OCCUPIED).count()
    }

    /// Occupied cells in row-major order (y outer, x inner).
    pub fn occupied_cells(&self) -> impl Iterator<Item = UVec2> + '_ {
        let width = self.info.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == OCCUPIED)
            .map(move |(idx, _)| UVec2::new((idx % width) as u32, (idx / width) as u32))
    }
}
