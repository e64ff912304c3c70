use crate::error::{FitError, Result};
use crate::geometry::PlaneEquation;
use crate::math::Point3;

use super::require_min_sample;

/// Computes the unique plane through three points.
///
/// Only the first three points are used. The result is canonical.
pub struct ExactPlaneFit<'a> {
    points: &'a [Point3],
}

impl<'a> ExactPlaneFit<'a> {
    /// Creates a new `ExactPlaneFit` over `points`.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self { points }
    }

    /// Executes the fit.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InsufficientPoints`] for fewer than three points
    /// and [`FitError::DegeneratePlane`] if the three points are collinear.
    pub fn execute(&self) -> Result<PlaneEquation> {
        require_min_sample(self.points)?;
        let (p0, p1, p2) = (&self.points[0], &self.points[1], &self.points[2]);

        let v1 = p0 - p1;
        let v2 = p0 - p2;
        let normal = v1.cross(&v2);
        if normal.iter().all(|c| c.abs() <= 0.0) {
            return Err(FitError::DegeneratePlane.into());
        }

        let d = -normal.dot(&p0.coords);
        PlaneEquation::from_normal(&normal, d).standardize()
    }
}

/// Fits the plane through the first three `points`.
///
/// # Errors
///
/// See [`ExactPlaneFit::execute`].
pub fn fit_plane_exact(points: &[Point3]) -> Result<PlaneEquation> {
    ExactPlaneFit::new(points).execute()
}
