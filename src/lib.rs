//! Roof facet plane estimation from aerial point clouds.
//!
//! Roof face outlines drawn on an aerial image are mapped into the point
//! cloud frame, the 3D points under each outline are lassoed, and a plane
//! `a*x + b*y + c*z + d = 0` is fitted to them. Planes are returned in
//! canonical form (unit normal, `c >= 0`) so they can be compared directly.

pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod metadata;
pub mod operations;

pub use config::{Algorithm, FitStrategy, ModelingConfig, RansacParams};
pub use error::{FaceError, FitError, Result, RoofError};
pub use geometry::{in_plane, standardize_plane, CloudPoint, PlaneEquation, Polygon};
pub use metadata::RoofMetadata;
pub use operations::fit::{fit_plane_exact, fit_plane_least_squares, fit_plane_robust};
pub use operations::model::{model_roof_planes, FacePlane, RoofModeler};
pub use operations::select::{lasso_indices, lasso_points};
pub use operations::transform::image_to_world;
