use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{MetadataError, Result};
use crate::math::Point2;
use crate::operations::transform::ImageToWorld;

/// Roof outline annotations for one aerial image.
///
/// Mirrors the `metadata.json` layout produced by the labeling tools:
///
/// ```json
/// {
///   "vertices": [[120.0, 80.0], [180.0, 80.0], [180.0, 140.0]],
///   "edges": [[0, 1], [1, 2], [2, 0]],
///   "faces": [[0, 1, 2]],
///   "ppm": 10.0
/// }
/// ```
///
/// Vertices are pixel coordinates `(column, row)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofMetadata {
    pub vertices: Vec<[f64; 2]>,
    #[serde(default)]
    pub edges: Vec<[usize; 2]>,
    pub faces: Vec<Vec<usize>>,
    #[serde(rename = "ppm")]
    pub pixels_per_meter: f64,
}

impl RoofMetadata {
    /// Parses and validates metadata from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Json`] for malformed input, or the error
    /// reported by [`RoofMetadata::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let metadata: Self = serde_json::from_str(json).map_err(MetadataError::from)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Parses and validates metadata from a reader.
    ///
    /// # Errors
    ///
    /// See [`RoofMetadata::from_json_str`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let metadata: Self = serde_json::from_reader(reader).map_err(MetadataError::from)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Checks the scale factor and that every face and edge index addresses
    /// a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidScale`] for a non-positive scale,
    /// [`MetadataError::VertexIndexOutOfRange`] for a dangling face index and
    /// [`MetadataError::EdgeIndexOutOfRange`] for a dangling edge index.
    pub fn validate(&self) -> Result<()> {
        if !(self.pixels_per_meter.is_finite() && self.pixels_per_meter > 0.0) {
            return Err(MetadataError::InvalidScale(self.pixels_per_meter).into());
        }
        let count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= count) {
                return Err(MetadataError::VertexIndexOutOfRange { face, index, count }.into());
            }
        }
        for (edge, indices) in self.edges.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= count) {
                return Err(MetadataError::EdgeIndexOutOfRange { edge, index, count }.into());
            }
        }
        Ok(())
    }

    /// Returns the vertices as pixel coordinates.
    #[must_use]
    pub fn pixel_vertices(&self) -> Vec<Point2> {
        self.vertices.iter().map(|&[x, y]| Point2::new(x, y)).collect()
    }

    /// Converts the vertices to world coordinates for an image of
    /// `image_shape = (rows, cols)`.
    #[must_use]
    pub fn world_vertices(&self, image_shape: (usize, usize)) -> Vec<Point2> {
        ImageToWorld::from_shape(self.pixels_per_meter, image_shape).execute(&self.pixel_vertices())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::RoofError;

    const SAMPLE: &str = r#"{
        "vertices": [[150.0, 100.0], [160.0, 110.0], [160.0, 90.0]],
        "edges": [[0, 1], [1, 2], [2, 0]],
        "faces": [[0, 1, 2]],
        "ppm": 10.0
    }"#;

    #[test]
    fn parses_sample() {
        let meta = RoofMetadata::from_json_str(SAMPLE).unwrap();
        assert_eq!(meta.vertices.len(), 3);
        assert_eq!(meta.edges, vec![[0, 1], [1, 2], [2, 0]]);
        assert_eq!(meta.faces, vec![vec![0, 1, 2]]);
        assert!((meta.pixels_per_meter - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_reader_matches_from_str() {
        let a = RoofMetadata::from_json_str(SAMPLE).unwrap();
        let b = RoofMetadata::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn world_vertices_apply_image_transform() {
        let meta = RoofMetadata::from_json_str(SAMPLE).unwrap();
        let world = meta.world_vertices((201, 301));
        assert_eq!(
            world,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, -1.0),
                Point2::new(1.0, 1.0)
            ]
        );
    }

    #[test]
    fn edges_are_optional() {
        let meta = RoofMetadata::from_json_str(
            r#"{"vertices": [[0, 0], [1, 0], [1, 1]], "faces": [[0, 1, 2]], "ppm": 2}"#,
        )
        .unwrap();
        assert!(meta.edges.is_empty());
    }

    #[test]
    fn rejects_non_positive_scale() {
        let err = RoofMetadata::from_json_str(
            r#"{"vertices": [], "faces": [], "ppm": 0.0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RoofError::Metadata(MetadataError::InvalidScale(_))));
    }

    #[test]
    fn rejects_dangling_face_index() {
        let err = RoofMetadata::from_json_str(
            r#"{"vertices": [[0, 0], [1, 0]], "faces": [[0, 1], [1, 5]], "ppm": 1}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RoofError::Metadata(MetadataError::VertexIndexOutOfRange {
                face: 1,
                index: 5,
                count: 2
            })
        ));
    }

    #[test]
    fn rejects_dangling_edge_index() {
        let err = RoofMetadata::from_json_str(
            r#"{"vertices": [[0, 0], [1, 0]], "edges": [[0, 1], [2, 0]], "faces": [], "ppm": 1}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RoofError::Metadata(MetadataError::EdgeIndexOutOfRange {
                edge: 1,
                index: 2,
                count: 2
            })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = RoofMetadata::from_json_str("{\"vertices\": ").unwrap_err();
        assert!(matches!(err, RoofError::Metadata(MetadataError::Json(_))));
    }
}
