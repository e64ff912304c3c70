use nalgebra::{DVector, MatrixXx3};
use tracing::debug;

use crate::error::{FitError, Result};
use crate::geometry::{in_plane, PlaneEquation};
use crate::math::{Matrix3, Point3};

use super::{require_min_sample, ExactPlaneFit};

/// Least-squares plane through a point set.
///
/// Solves `A * n = 1` in the least-squares sense, where the rows of `A`
/// are the point coordinates. This fixes `d = -1`, so planes through the
/// origin cannot be produced by the closed-form path:
///
/// ```text
/// a*x + b*y + c*z + d = 0   with d = -1   =>   A * (a, b, c)^T = 1
/// (a, b, c)^T = (A^T A)^-1 * A^T * 1
/// ```
///
/// The Gram matrix `A^T A` decides the branch taken:
/// - rank < 2: the points are collinear or coincident and no plane family
///   can be determined.
/// - rank == 2: the Gram matrix is singular. The exact plane through the
///   first three points is accepted only if every point lies on it.
/// - rank 3: the normal equations are solved directly.
pub struct LeastSquaresPlaneFit<'a> {
    points: &'a [Point3],
}

impl<'a> LeastSquaresPlaneFit<'a> {
    /// Creates a new `LeastSquaresPlaneFit` over `points`.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self { points }
    }

    /// Executes the fit, returning a canonical plane.
    ///
    /// # Errors
    ///
    /// - [`FitError::InsufficientPoints`] for fewer than three points.
    /// - [`FitError::UnderdeterminedFit`] if the Gram matrix has rank < 2.
    /// - [`FitError::UnableToFit`] if the Gram matrix is singular and the
    ///   exact fallback plane does not contain every point.
    pub fn execute(&self) -> Result<PlaneEquation> {
        require_min_sample(self.points)?;

        let n = self.points.len();
        let design = MatrixXx3::from_fn(n, |i, j| self.points[i][j]);
        let gram: Matrix3 = design.tr_mul(&design);
        let rank = gram_rank(&gram);

        if rank < 2 {
            return Err(FitError::UnderdeterminedFit { rank }.into());
        }
        if rank == 2 {
            debug!(points = n, "singular gram matrix, using exact fallback");
            return self.exact_fallback(rank);
        }

        let Some(gram_inv) = gram.try_inverse() else {
            debug!(points = n, "gram matrix not invertible, using exact fallback");
            return self.exact_fallback(rank);
        };

        let ones = DVector::from_element(n, 1.0);
        let normal = gram_inv * design.tr_mul(&ones);
        debug!(points = n, "solved normal equations");
        PlaneEquation::from_normal(&normal, -1.0).standardize()
    }

    /// Exact plane through the first three points, verified against all of
    /// them.
    fn exact_fallback(&self, rank: usize) -> Result<PlaneEquation> {
        let plane = ExactPlaneFit::new(self.points)
            .execute()
            .map_err(|_| FitError::UnableToFit { rank })?;
        if in_plane(self.points, &plane) {
            Ok(plane)
        } else {
            Err(FitError::UnableToFit { rank }.into())
        }
    }
}

/// Numerical rank of a Gram matrix from its singular values.
///
/// Singular values below `sigma_max * 3 * EPSILON` count as zero.
fn gram_rank(gram: &Matrix3) -> usize {
    let svd = gram.svd(false, false);
    let sigma_max = svd.singular_values.max();
    let tol = sigma_max * 3.0 * f64::EPSILON;
    svd.rank(tol)
}

/// Fits the least-squares plane through `points`.
///
/// # Errors
///
/// See [`LeastSquaresPlaneFit::execute`].
pub fn fit_plane_least_squares(points: &[Point3]) -> Result<PlaneEquation> {
    LeastSquaresPlaneFit::new(points).execute()
}
