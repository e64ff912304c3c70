mod roof_planes;

pub use roof_planes::{model_roof_planes, FacePlane, RoofModeler};
