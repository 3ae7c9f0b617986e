//! Point and bounds types shared by the plane fit, the accumulator and the exporters.

use glam::{DVec2, DVec3};

/// A map point as dumped by the SLAM system. `id` is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub id: i64,
    pub position: DVec3,
}

impl MapPoint {
    pub fn new(id: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            position: DVec3::new(x, y, z),
        }
    }
}

/// A map point expressed in the 2-D coordinates of the fitted plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub id: i64,
    pub position: DVec2,
}

impl ProjectedPoint {
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: DVec2::new(x, y),
        }
    }
}

/// Axis-aligned rectangle in plane coordinates.
/// Convention: [min.x, max.x] x [min.y, max.y], both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl GridBounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Bounds that contain nothing. Expanding by any point makes them non-empty.
    pub fn empty() -> Self {
        Self {
            min: DVec2::splat(f64::INFINITY),
            max: DVec2::splat(f64::NEG_INFINITY),
        }
    }

    /// Bounding box of all projected points. Empty if `points` is empty.
    pub fn from_points(points: &[ProjectedPoint]) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand_to_include(p.position);
        }
        bounds
    }

    /// Returns true if no point has been included (min > max in either axis).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand this bounds to include the point (in place).
    pub fn expand_to_include(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn size(&self) -> DVec2 {
        if self.is_empty() {
            return DVec2::ZERO;
        }
        self.max - self.min
    }
}
