mod image_to_world;

pub use image_to_world::{image_to_world, ImageToWorld};
