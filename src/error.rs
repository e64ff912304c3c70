use thiserror::Error;

/// Top-level error type for roof plane estimation.
#[derive(Debug, Error)]
pub enum RoofError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Errors related to geometric lookups.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("vertex index {index} is out of range for {count} vertices")]
    VertexIndexOutOfRange { index: usize, count: usize },
}

/// Errors raised while fitting a plane to points.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    /// The sample is collinear or the plane normal is the zero vector.
    #[error("degenerate plane: normal vector is zero")]
    DegeneratePlane,

    #[error("unable to determine best fit plane; gram matrix rank is {rank}")]
    UnderdeterminedFit { rank: usize },

    #[error("unable to fit plane; rank {rank} fallback does not contain every point")]
    UnableToFit { rank: usize },

    #[error("insufficient points: {actual} given, {required} required")]
    InsufficientPoints { required: usize, actual: usize },
}

/// Errors related to modeling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors related to roof metadata input.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("malformed metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pixels-per-meter must be positive, got {0}")]
    InvalidScale(f64),

    #[error("face {face} references vertex {index}, but only {count} vertices exist")]
    VertexIndexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },

    #[error("edge {edge} references vertex {index}, but only {count} vertices exist")]
    EdgeIndexOutOfRange {
        edge: usize,
        index: usize,
        count: usize,
    },
}

/// A fitting failure attached to the roof face that produced it.
#[derive(Debug, Error)]
#[error("face {face}: {source}")]
pub struct FaceError {
    /// Index of the face in the modeler's input order.
    pub face: usize,
    #[source]
    pub source: RoofError,
}

/// Convenience type alias for results using [`RoofError`].
pub type Result<T> = std::result::Result<T, RoofError>;
