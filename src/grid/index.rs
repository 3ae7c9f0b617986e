//! Quantization of continuous plane coordinates into cell indices.

use glam::{DVec2, IVec2};

use crate::types::MapError;

/// Cell index of `coord` along one axis: `floor((coord - origin) / cell_size)`.
///
/// Flooring (rather than truncating) keeps bucketing consistent on both sides
/// of the origin, so `-0.5` lands in cell `-1`. Results beyond the `i32` range
/// saturate.
pub fn to_cell_index(coord: f64, origin: f64, cell_size: f64) -> Result<i32, MapError> {
    check_cell_size(cell_size)?;
    Ok(floor_index(coord, origin, cell_size))
}

/// Cell containing `pos`. `cell_size` must already be validated.
#[inline]
pub fn world_to_cell(pos: DVec2, origin: DVec2, cell_size: f64) -> IVec2 {
    IVec2::new(
        floor_index(pos.x, origin.x, cell_size),
        floor_index(pos.y, origin.y, cell_size),
    )
}

pub(crate) fn check_cell_size(cell_size: f64) -> Result<(), MapError> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(MapError::InvalidConfig(format!(
            "cell size must be a positive finite number, got {cell_size}"
        )));
    }
    Ok(())
}

#[inline]
fn floor_index(coord: f64, origin: f64, cell_size: f64) -> i32 {
    ((coord - origin) / cell_size).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_positive_and_negative() {
        assert_eq!(to_cell_index(0.0, 0.0, 1.0).unwrap(), 0);
        assert_eq!(to_cell_index(0.99, 0.0, 1.0).unwrap(), 0);
        assert_eq!(to_cell_index(1.0, 0.0, 1.0).unwrap(), 1);
        assert_eq!(to_cell_index(-0.5, 0.0, 1.0).unwrap(), -1);
        assert_eq!(to_cell_index(-1.0, 0.0, 1.0).unwrap(), -1);
        assert_eq!(to_cell_index(-1.01, 0.0, 1.0).unwrap(), -2);
    }

    #[test]
    fn respects_origin_and_cell_size() {
        assert_eq!(to_cell_index(2.35, -1.0, 0.1).unwrap(), 33);
        assert_eq!(to_cell_index(-1.0, -1.0, 0.1).unwrap(), 0);
        assert_eq!(
            world_to_cell(DVec2::new(1.25, -0.25), DVec2::new(0.0, -1.0), 0.5),
            IVec2::new(2, 1)
        );
    }

    #[test]
    fn rejects_bad_cell_size() {
        for cell_size in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                to_cell_index(1.0, 0.0, cell_size),
                Err(MapError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn saturates_far_coordinates() {
        assert_eq!(to_cell_index(1e300, 0.0, 0.1).unwrap(), i32::MAX);
        assert_eq!(to_cell_index(-1e300, 0.0, 0.1).unwrap(), i32::MIN);
    }
}
