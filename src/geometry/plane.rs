use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};
use crate::math::{Point3, Vector3, PLANE_TOLERANCE};

/// An infinite plane in implicit form.
///
/// Represents `a * x + b * y + c * z + d = 0`. Fitting operations always
/// return the canonical form produced by [`PlaneEquation::standardize`]:
/// the normal `(a, b, c)` has unit length and `c >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PlaneEquation {
    /// The canonical ground plane `z = 0`.
    pub const GROUND: Self = Self::new(0.0, 0.0, 1.0, 0.0);

    /// Creates a plane from raw coefficients. No normalization is applied.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Creates a plane from a normal vector and the offset `d`.
    #[must_use]
    pub fn from_normal(normal: &Vector3, d: f64) -> Self {
        Self::new(normal.x, normal.y, normal.z, d)
    }

    /// Returns the (not necessarily unit) normal vector `(a, b, c)`.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Returns the coefficients as `[a, b, c, d]`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Evaluates `a * x + b * y + c * z + d` at `point`.
    ///
    /// For a canonical plane this is the signed perpendicular distance.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.a * point.x + self.b * point.y + self.c * point.z + self.d
    }

    /// Perpendicular distance from `point` to the plane.
    ///
    /// Assumes a unit normal, which holds for every canonical plane.
    #[must_use]
    pub fn distance(&self, point: &Point3) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Returns `true` if the plane equation holds at `point` within
    /// [`PLANE_TOLERANCE`].
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        self.distance(point) <= PLANE_TOLERANCE
    }

    /// Returns the canonical form of this plane.
    ///
    /// Flips all four coefficients when `c < 0`, then divides them by the
    /// norm of `(a, b, c)`. Vertical planes (`c == 0`) are oriented so that
    /// `a > 0`, or `b > 0` when `a == 0` as well.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::DegeneratePlane`] if `(a, b, c)` is the zero
    /// vector.
    #[allow(clippy::float_cmp)]
    pub fn standardize(&self) -> Result<Self> {
        let norm = self.normal().norm();
        if norm <= 0.0 || !norm.is_finite() {
            return Err(FitError::DegeneratePlane.into());
        }

        let flip = if self.c == 0.0 {
            self.a < 0.0 || (self.a == 0.0 && self.b < 0.0)
        } else {
            self.c < 0.0
        };
        let scale = if flip { -norm } else { norm };

        Ok(Self::new(
            self.a / scale,
            self.b / scale,
            self.c / scale,
            self.d / scale,
        ))
    }
}

impl From<[f64; 4]> for PlaneEquation {
    fn from([a, b, c, d]: [f64; 4]) -> Self {
        Self::new(a, b, c, d)
    }
}

impl From<PlaneEquation> for [f64; 4] {
    fn from(plane: PlaneEquation) -> Self {
        plane.coefficients()
    }
}

/// Normalizes `plane` to its canonical, comparable form.
///
/// # Errors
///
/// Returns [`FitError::DegeneratePlane`] if the plane has a zero normal.
pub fn standardize_plane(plane: &PlaneEquation) -> Result<PlaneEquation> {
    plane.standardize()
}

/// Returns `true` if every point satisfies the plane equation within
/// [`PLANE_TOLERANCE`].
#[must_use]
pub fn in_plane(points: &[Point3], plane: &PlaneEquation) -> bool {
    points.iter().all(|p| plane.contains(p))
}
