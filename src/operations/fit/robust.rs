use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::RansacParams;
use crate::error::{FitError, Result};
use crate::geometry::PlaneEquation;
use crate::math::Point3;

use super::{require_min_sample, ExactPlaneFit, MIN_SAMPLE_SIZE};

/// Result of RANSAC plane fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct RobustFit {
    /// The best plane found, in canonical form.
    pub plane: PlaneEquation,
    /// Indices of the points within the threshold of `plane`, ascending.
    pub inliers: Vec<usize>,
    /// Number of trials evaluated.
    pub iterations: usize,
    /// Number of trials skipped because the sample was collinear.
    pub skipped: usize,
}

/// Outlier-resistant plane fit using random sample consensus.
///
/// Each trial fits an exact plane through three points drawn without
/// replacement and counts the points within `threshold` of it. The plane
/// with the most inliers wins; on ties the earliest trial is kept.
pub struct RobustPlaneFit<'a> {
    points: &'a [Point3],
    params: RansacParams,
}

impl<'a> RobustPlaneFit<'a> {
    /// Creates a new `RobustPlaneFit` with default parameters.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self {
            points,
            params: RansacParams::default(),
        }
    }

    /// Replaces all parameters.
    #[must_use]
    pub fn with_params(mut self, params: RansacParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the inlier distance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.params.threshold = threshold;
        self
    }

    /// Sets the number of trials.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.params.iterations = iterations;
        self
    }

    /// Seeds the random generator for reproducible results.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    /// Executes the fit using the configured seed, or OS entropy if unset.
    ///
    /// # Errors
    ///
    /// See [`RobustPlaneFit::execute_with_rng`].
    pub fn execute(&self) -> Result<RobustFit> {
        let mut rng = match self.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.execute_with_rng(&mut rng)
    }

    /// Executes the fit drawing samples from `rng`.
    ///
    /// The configured seed is ignored; results depend only on `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`](crate::error::ConfigError::Invalid)
    /// for a negative or non-finite threshold,
    /// [`FitError::InsufficientPoints`] for fewer than three points
    /// and [`FitError::DegeneratePlane`] if no trial produced a plane (every
    /// sample was collinear, or zero iterations were requested).
    pub fn execute_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RobustFit> {
        self.params.validate_threshold()?;
        require_min_sample(self.points)?;
        let n = self.points.len();
        let threshold = self.params.threshold;

        let mut best: Option<(PlaneEquation, usize)> = None;
        let mut skipped = 0;

        for _ in 0..self.params.iterations {
            let sample = index::sample(rng, n, MIN_SAMPLE_SIZE);
            let triple = [
                self.points[sample.index(0)],
                self.points[sample.index(1)],
                self.points[sample.index(2)],
            ];
            let Ok(candidate) = ExactPlaneFit::new(&triple).execute() else {
                skipped += 1;
                continue;
            };

            let count = self
                .points
                .iter()
                .filter(|p| candidate.distance(p) <= threshold)
                .count();
            let improves = match best {
                Some((_, best_count)) => count > best_count,
                None => true,
            };
            if improves {
                best = Some((candidate, count));
            }
        }

        let Some((plane, count)) = best else {
            return Err(FitError::DegeneratePlane.into());
        };
        let plane = plane.standardize()?;
        let inliers: Vec<usize> = (0..n)
            .filter(|&i| plane.distance(&self.points[i]) <= threshold)
            .collect();

        debug!(
            points = n,
            inliers = count,
            iterations = self.params.iterations,
            skipped,
            "ransac plane fit finished"
        );

        Ok(RobustFit {
            plane,
            inliers,
            iterations: self.params.iterations,
            skipped,
        })
    }
}

/// Fits a plane robust to outliers, seeded from OS entropy.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`](crate::error::ConfigError::Invalid) if
/// `threshold` is negative or non-finite or `iterations` is zero, otherwise
/// see [`RobustPlaneFit::execute_with_rng`].
pub fn fit_plane_robust(
    points: &[Point3],
    threshold: f64,
    iterations: usize,
) -> Result<PlaneEquation> {
    let params = RansacParams::default()
        .with_threshold(threshold)
        .with_iterations(iterations);
    params.validate()?;
    RobustPlaneFit::new(points)
        .with_params(params)
        .execute()
        .map(|fit| fit.plane)
}
