use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Parameters for RANSAC plane fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RansacParams {
    /// Maximum point-to-plane distance for a point to count as an inlier.
    pub threshold: f64,
    /// Number of random minimal samples to evaluate.
    pub iterations: usize,
    /// Optional seed for reproducible results. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RansacParams {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            iterations: 500,
            seed: None,
        }
    }
}

impl RansacParams {
    /// Sets the inlier distance threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets a random seed for reproducibility.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the threshold is a finite non-negative distance and that
    /// at least one iteration is requested.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        self.validate_threshold()?;
        if self.iterations == 0 {
            return Err(ConfigError::Invalid("iterations must be at least 1".into()).into());
        }
        Ok(())
    }

    /// Checks only the inlier threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a negative or non-finite
    /// threshold.
    pub fn validate_threshold(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "threshold must be a finite non-negative distance, got {}",
                self.threshold
            ))
            .into());
        }
        Ok(())
    }
}

/// Plane fitting algorithm selector, as written in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Robust,
    LeastSquares,
}

/// Plane fitting strategy applied to each roof face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitStrategy {
    /// RANSAC with the given parameters.
    Robust(RansacParams),
    /// Closed-form least squares over every selected point.
    LeastSquares,
}

impl Default for FitStrategy {
    fn default() -> Self {
        Self::Robust(RansacParams::default())
    }
}

/// Configuration for modeling a batch of roof faces.
///
/// RANSAC fields sit next to the algorithm selector and are ignored for
/// least squares. Unknown keys are rejected.
///
/// ```json
/// { "algorithm": "robust", "threshold": 0.2, "iterations": 500, "seed": 7, "parallel": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelingConfig {
    pub algorithm: Algorithm,
    pub threshold: f64,
    pub iterations: usize,
    pub seed: Option<u64>,
    /// Fit faces on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ModelingConfig {
    fn default() -> Self {
        let ransac = RansacParams::default();
        Self {
            algorithm: Algorithm::default(),
            threshold: ransac.threshold,
            iterations: ransac.iterations,
            seed: ransac.seed,
            parallel: false,
        }
    }
}

impl ModelingConfig {
    /// Parses and validates a JSON config. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and
    /// [`ConfigError::Invalid`] for out-of-range RANSAC parameters.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.ransac().validate()?;
        Ok(config)
    }

    /// RANSAC parameters carried by this config.
    #[must_use]
    pub fn ransac(&self) -> RansacParams {
        RansacParams {
            threshold: self.threshold,
            iterations: self.iterations,
            seed: self.seed,
        }
    }

    /// Returns the fit strategy this config selects.
    #[must_use]
    pub fn strategy(&self) -> FitStrategy {
        match self.algorithm {
            Algorithm::Robust => FitStrategy::Robust(self.ransac()),
            Algorithm::LeastSquares => FitStrategy::LeastSquares,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::RoofError;

    #[test]
    fn defaults() {
        let params = RansacParams::default();
        assert!((params.threshold - 0.2).abs() < f64::EPSILON);
        assert_eq!(params.iterations, 500);
        assert_eq!(params.seed, None);
        assert_eq!(
            ModelingConfig::default().strategy(),
            FitStrategy::Robust(params)
        );
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = ModelingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ModelingConfig::default());
    }

    #[test]
    fn parses_robust_overrides() {
        let config = ModelingConfig::from_json_str(
            r#"{"algorithm": "robust", "threshold": 0.1, "seed": 7, "parallel": true}"#,
        )
        .unwrap();
        assert!(config.parallel);
        assert_eq!(
            config.strategy(),
            FitStrategy::Robust(RansacParams::default().with_threshold(0.1).with_seed(7))
        );
    }

    #[test]
    fn parses_flat_ransac_fields() {
        let config = ModelingConfig::from_json_str(
            r#"{"algorithm": "robust", "threshold": 0.05, "iterations": 10}"#,
        )
        .unwrap();
        assert_eq!(
            config.strategy(),
            FitStrategy::Robust(
                RansacParams::default()
                    .with_threshold(0.05)
                    .with_iterations(10)
            )
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        for json in [
            r#"{"ransac": {"threshold": 0.1}}"#,
            r#"{"treshold": 0.1}"#,
        ] {
            let err = ModelingConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, RoofError::Config(ConfigError::Json(_))), "{json}");
        }
        assert!(serde_json::from_str::<RansacParams>(r#"{"iters": 3}"#).is_err());
    }

    #[test]
    fn parses_least_squares() {
        let config = ModelingConfig::from_json_str(r#"{"algorithm": "least_squares"}"#).unwrap();
        assert_eq!(config.strategy(), FitStrategy::LeastSquares);
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let err = ModelingConfig::from_json_str(r#"{"algorithm": "hough"}"#).unwrap_err();
        assert!(matches!(err, RoofError::Config(ConfigError::Json(_))));
    }

    #[test]
    fn rejects_invalid_params() {
        let err = ModelingConfig::from_json_str(r#"{"iterations": 0}"#).unwrap_err();
        assert!(matches!(err, RoofError::Config(ConfigError::Invalid(_))));

        let err = RansacParams::default().with_threshold(-1.0).validate().unwrap_err();
        assert!(matches!(err, RoofError::Config(ConfigError::Invalid(_))));

        let err = RansacParams::default()
            .with_threshold(f64::NAN)
            .validate_threshold()
            .unwrap_err();
        assert!(matches!(err, RoofError::Config(ConfigError::Invalid(_))));
    }
}
