//! Least-squares plane fitting and projection of map points onto the plane.
//!
//! The plane passes through the centroid of the points; its normal is the
//! direction of least variance, i.e. the eigenvector of the smallest
//! eigenvalue of the sample covariance matrix.

use glam::{DQuat, DVec2, DVec3};
use nalgebra::{Matrix3, Vector3};

use crate::config::PlaneBasis;
use crate::types::{MapError, MapPoint, ProjectedPoint};

const EIGEN_CONVERGENCE: f64 = 1e-12;
const EIGEN_ITERATIONS: usize = 1000;
/// Two smallest eigenvalues closer than this (relative to the largest) leave
/// the normal undetermined.
const EIGEN_TIE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    centroid: DVec3,
    normal: DVec3,
    /// Covariance eigenvalues, ascending.
    eigenvalues: [f64; 3],
    /// Unit in-plane directions of largest and second-largest variance.
    /// Together with `normal` they form a right-handed frame.
    principal_axes: [DVec3; 2],
    /// Shortest rotation taking `normal` onto +Z.
    to_horizontal: DQuat,
    basis: PlaneBasis,
}

impl Plane {
    /// Fits a plane using the default in-plane basis.
    pub fn fit(points: &[MapPoint]) -> Result<Self, MapError> {
        Self::fit_with_basis(points, PlaneBasis::default())
    }

    pub fn fit_with_basis(points: &[MapPoint], basis: PlaneBasis) -> Result<Self, MapError> {
        if points.len() < 3 {
            return Err(MapError::DegenerateInput(format!(
                "plane fit needs at least 3 points, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.position.is_finite()) {
            return Err(MapError::DegenerateInput(format!(
                "point {} has a non-finite coordinate",
                bad.id
            )));
        }

        let n = points.len() as f64;
        let centroid = points.iter().map(|p| p.position).sum::<DVec3>() / n;

        let mut covariance = Matrix3::<f64>::zeros();
        for p in points {
            let d = p.position - centroid;
            let d = Vector3::new(d.x, d.y, d.z);
            covariance += d * d.transpose();
        }
        covariance /= n - 1.0;

        let eigen = covariance
            .try_symmetric_eigen(EIGEN_CONVERGENCE, EIGEN_ITERATIONS)
            .ok_or_else(|| {
                MapError::DegenerateInput("covariance eigendecomposition did not converge".into())
            })?;

        // Stable sort: on exactly equal eigenvalues the lower index comes first.
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
        let eigenvalues = order.map(|i| eigen.eigenvalues[i]);
        let column = |i: usize| {
            let c = eigen.eigenvectors.column(i);
            DVec3::new(c[0], c[1], c[2]).normalize()
        };

        let [smallest, middle, largest] = eigenvalues;
        if largest <= f64::MIN_POSITIVE {
            return Err(MapError::DegenerateInput(
                "all points coincide, plane is undefined".into(),
            ));
        }
        if middle - smallest <= EIGEN_TIE_TOLERANCE * largest {
            return Err(MapError::DegenerateInput(format!(
                "points are collinear or isotropic, normal is ambiguous \
                 (eigenvalues {smallest:e}, {middle:e}, {largest:e})"
            )));
        }

        let normal = canonical_sign(column(order[0]));
        let major = canonical_sign(column(order[2]));
        // Re-derive the minor axis so the frame is exactly right-handed.
        let minor = normal.cross(major).normalize();

        log::debug!(
            "fitted plane: centroid {centroid}, normal {normal}, eigenvalues {eigenvalues:?}"
        );

        Ok(Self {
            centroid,
            normal,
            eigenvalues,
            principal_axes: [major, minor],
            to_horizontal: DQuat::from_rotation_arc(normal, DVec3::Z),
            basis,
        })
    }

    pub fn centroid(&self) -> DVec3 {
        self.centroid
    }

    /// Unit normal, oriented so that its z component is non-negative.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Covariance eigenvalues in ascending order. The first one is the
    /// variance of the points along the normal.
    pub fn eigenvalues(&self) -> [f64; 3] {
        self.eigenvalues
    }

    pub fn principal_axes(&self) -> [DVec3; 2] {
        self.principal_axes
    }

    pub fn basis(&self) -> PlaneBasis {
        self.basis
    }

    /// Same plane, different in-plane basis.
    pub fn with_basis(mut self, basis: PlaneBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Signed distance of `p` from the plane along the normal.
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        (p - self.centroid).dot(self.normal)
    }

    /// Orthogonal projection of `p` onto the plane.
    ///
    /// Equal to centering `p`, removing its component along the normal and
    /// translating back; a point already on the plane is returned unchanged.
    pub fn project_point(&self, p: DVec3) -> DVec3 {
        p - self.signed_distance(p) * self.normal
    }

    /// In-plane 2-D coordinates of `p` in this plane's basis.
    pub fn to_plane_coords(&self, p: DVec3) -> DVec2 {
        let q = self.project_point(p);
        match self.basis {
            PlaneBasis::Aligned => self.to_horizontal.mul_vec3(q).truncate(),
            PlaneBasis::Principal => {
                let [major, minor] = self.principal_axes;
                DVec2::new(q.dot(major), q.dot(minor))
            }
        }
    }

    /// Projects every point, keeping order and ids.
    pub fn project(&self, points: &[MapPoint]) -> Vec<ProjectedPoint> {
        points
            .iter()
            .map(|p| ProjectedPoint {
                id: p.id,
                position: self.to_plane_coords(p.position),
            })
            .collect()
    }

    /// Projects every point onto the plane in 3-D, keeping order and ids.
    pub fn flatten(&self, points: &[MapPoint]) -> Vec<MapPoint> {
        points
            .iter()
            .map(|p| MapPoint {
                id: p.id,
                position: self.project_point(p.position),
            })
            .collect()
    }
}

/// Flips `v` so its last non-zero component (z, then y, then x) is positive.
fn canonical_sign(v: DVec3) -> DVec3 {
    let key = if v.z != 0.0 {
        v.z
    } else if v.y != 0.0 {
        v.y
    } else {
        v.x
    };
    if key < 0.0 { -v } else { v }
}
