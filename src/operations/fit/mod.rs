mod exact;
mod least_squares;
mod robust;

pub use exact::{fit_plane_exact, ExactPlaneFit};
pub use least_squares::{fit_plane_least_squares, LeastSquaresPlaneFit};
pub use robust::{fit_plane_robust, RobustFit, RobustPlaneFit};

use crate::error::{FitError, Result};
use crate::math::Point3;

/// Number of points that determine a plane.
pub const MIN_SAMPLE_SIZE: usize = 3;

/// Fails with [`FitError::InsufficientPoints`] unless `points` holds at
/// least [`MIN_SAMPLE_SIZE`] entries.
fn require_min_sample(points: &[Point3]) -> Result<()> {
    if points.len() < MIN_SAMPLE_SIZE {
        return Err(FitError::InsufficientPoints {
            required: MIN_SAMPLE_SIZE,
            actual: points.len(),
        }
        .into());
    }
    Ok(())
}
