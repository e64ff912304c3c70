use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{trace, warn};

use crate::config::{FitStrategy, ModelingConfig, RansacParams};
use crate::error::{FaceError, Result};
use crate::geometry::{positions, CloudPoint, PlaneEquation, Polygon};
use crate::math::Point2;
use crate::operations::fit::{LeastSquaresPlaneFit, RobustPlaneFit};
use crate::operations::select::Lasso;

/// Outcome for one roof face: its plane, or the failure tagged with the
/// face index.
pub type FacePlane = std::result::Result<PlaneEquation, FaceError>;

/// Fits one plane per roof face.
///
/// Each face is resolved to a polygon over the shared vertex array, the
/// cloud points under it are lassoed, and the configured strategy fits a
/// plane to their positions. A failing face is reported in place and does
/// not stop the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoofModeler {
    strategy: FitStrategy,
    parallel: bool,
}

impl RoofModeler {
    /// Creates a sequential modeler using `strategy`.
    #[must_use]
    pub fn new(strategy: FitStrategy) -> Self {
        Self {
            strategy,
            parallel: false,
        }
    }

    /// Creates a modeler from a parsed config.
    #[must_use]
    pub fn from_config(config: &ModelingConfig) -> Self {
        Self::new(config.strategy()).with_parallel(config.parallel)
    }

    /// Enables or disables fitting faces on the rayon thread pool.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the configured strategy.
    #[must_use]
    pub fn strategy(&self) -> FitStrategy {
        self.strategy
    }

    /// Models every face, returning results in face order.
    #[must_use]
    pub fn execute(
        &self,
        cloud: &[CloudPoint],
        vertices: &[Point2],
        faces: &[Vec<usize>],
    ) -> Vec<FacePlane> {
        let model = |(index, face): (usize, &Vec<usize>)| {
            self.model_face(index, cloud, vertices, face)
                .map_err(|source| {
                    let err = FaceError {
                        face: index,
                        source,
                    };
                    warn!(error = %err, "roof face could not be modeled");
                    err
                })
        };

        if self.parallel {
            faces.par_iter().enumerate().map(model).collect()
        } else {
            faces.iter().enumerate().map(model).collect()
        }
    }

    fn model_face(
        &self,
        index: usize,
        cloud: &[CloudPoint],
        vertices: &[Point2],
        face: &[usize],
    ) -> Result<PlaneEquation> {
        let polygon = Polygon::from_face(vertices, face)?;
        let selected = Lasso::new(&polygon).execute(cloud);
        trace!(face = index, points = selected.len(), "lassoed face points");

        let xyz = positions(&selected);
        match self.strategy {
            FitStrategy::LeastSquares => LeastSquaresPlaneFit::new(&xyz).execute(),
            FitStrategy::Robust(params) => {
                let mut rng = face_rng(&params, index);
                RobustPlaneFit::new(&xyz)
                    .with_params(params)
                    .execute_with_rng(&mut rng)
                    .map(|fit| fit.plane)
            }
        }
    }
}

/// Independent random stream for one face.
///
/// Seeded runs derive the stream from `seed + face`, so results do not
/// depend on how faces are scheduled across threads.
fn face_rng(params: &RansacParams, face: usize) -> StdRng {
    match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(face as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Models one plane per face of `faces` with the given strategy.
#[must_use]
pub fn model_roof_planes(
    cloud: &[CloudPoint],
    vertices: &[Point2],
    faces: &[Vec<usize>],
    strategy: FitStrategy,
) -> Vec<FacePlane> {
    RoofModeler::new(strategy).execute(cloud, vertices, faces)
}
