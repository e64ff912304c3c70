pub mod plane;
pub mod point;
pub mod polygon;

pub use plane::{in_plane, standardize_plane, PlaneEquation};
pub use point::{cloud_from_rows, positions, CloudPoint};
pub use polygon::Polygon;
