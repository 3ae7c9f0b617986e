//! Merge policies for combining partial occupancy grids.
//!
//! **Assumption:** `master` and `source` share the same dimensions and alignment so that
//! cell `(x, y)` is the same world cell in both grids.

use crate::grid::OccupancyGrid;
use crate::types::MapError;

/// Marks every cell occupied in either grid. Marking is monotonic, so the
/// result does not depend on the order partial grids are merged in.
pub fn merge_occupied(master: &mut OccupancyGrid, source: &OccupancyGrid) -> Result<(), MapError> {
    if master.info() != source.info() {
        return Err(MapError::InvalidMetadata(format!(
            "cannot merge {}x{} grid into {}x{} grid",
            source.width(),
            source.height(),
            master.width(),
            master.height()
        )));
    }

    for (dst, src) in master.data_mut().iter_mut().zip(source.data()) {
        *dst |= *src;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::{IVec2, UVec2};

    use super::*;
    use crate::types::{MapInfo, OCCUPIED};

    #[test]
    fn merge_is_union() {
        let info = MapInfo::square(4, 1.0);
        let mut a = OccupancyGrid::empty(info.clone());
        let mut b = OccupancyGrid::empty(info);
        a.set_if_in_bounds(IVec2::new(0, 0), OCCUPIED);
        a.set_if_in_bounds(IVec2::new(1, 1), OCCUPIED);
        b.set_if_in_bounds(IVec2::new(1, 1), OCCUPIED);
        b.set_if_in_bounds(IVec2::new(3, 2), OCCUPIED);

        merge_occupied(&mut a, &b).unwrap();
        assert_eq!(a.occupied_count(), 3);
        assert!(a.is_occupied(UVec2::new(3, 2)));
    }

    #[test]
    fn merge_rejects_mismatched_grids() {
        let mut a = OccupancyGrid::empty(MapInfo::square(4, 1.0));
        let b = OccupancyGrid::empty(MapInfo::square(5, 1.0));
        assert!(merge_occupied(&mut a, &b).is_err());
    }
}
