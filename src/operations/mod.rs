pub mod fit;
pub mod model;
pub mod select;
pub mod transform;
