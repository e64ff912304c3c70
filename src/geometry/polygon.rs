use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{
    crossing_parity_2d, fan_area_2d, point_on_segment_2d, signed_area_2d,
};
use crate::math::{Point2, TOLERANCE};

/// A closed 2D polygon in world coordinates.
///
/// The last vertex connects back to the first. Used only for containment
/// tests and never mutated after construction, so degeneracy is decided
/// once here.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
    degenerate: bool,
}

impl Polygon {
    /// Creates a polygon from its ordered vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        let degenerate = vertices.len() < 3 || fan_area_2d(&vertices) < TOLERANCE;
        Self {
            vertices,
            degenerate,
        }
    }

    /// Resolves a face (indices into `vertices`) to a polygon.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::VertexIndexOutOfRange`] if any index does
    /// not address a vertex.
    pub fn from_face(vertices: &[Point2], face: &[usize]) -> Result<Self> {
        let resolved = face
            .iter()
            .map(|&index| {
                vertices
                    .get(index)
                    .copied()
                    .ok_or(GeometryError::VertexIndexOutOfRange {
                        index,
                        count: vertices.len(),
                    })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(resolved))
    }

    /// Returns the polygon vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Signed area (positive for counter-clockwise rings).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    /// Returns `true` for polygons that cannot enclose anything: fewer than
    /// three vertices, or all vertices on one line.
    ///
    /// Self-intersecting rings whose lobes cancel in [`Polygon::signed_area`]
    /// are not degenerate.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Point-in-polygon test using the even-odd rule.
    ///
    /// Points lying exactly on an edge are classified as inside. Degenerate
    /// polygons contain nothing.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        if self.degenerate {
            return false;
        }
        let n = self.vertices.len();
        let on_boundary = (0..n)
            .any(|i| point_on_segment_2d(point, &self.vertices[i], &self.vertices[(i + 1) % n]));
        on_boundary || crossing_parity_2d(point, &self.vertices)
    }
}

impl From<Vec<Point2>> for Polygon {
    fn from(vertices: Vec<Point2>) -> Self {
        Self::new(vertices)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn contains_interior_points() {
        let sq = unit_square();
        assert!(sq.contains(&Point2::new(0.1, 0.1)));
        assert!(sq.contains(&Point2::new(0.9, 0.9)));
    }

    #[test]
    fn rejects_exterior_points() {
        let sq = unit_square();
        for p in [(1.1, 0.1), (0.1, 1.1), (-0.1, 0.1), (0.1, -0.1)] {
            assert!(!sq.contains(&Point2::new(p.0, p.1)), "{p:?}");
        }
    }

    #[test]
    fn boundary_points_are_inside() {
        let sq = unit_square();
        for p in [(0.0, 0.5), (1.0, 0.5), (0.5, 0.0), (0.5, 1.0), (0.0, 0.0), (1.0, 1.0)] {
            assert!(sq.contains(&Point2::new(p.0, p.1)), "{p:?}");
        }
    }

    #[test]
    fn degenerate_polygons_contain_nothing() {
        let line = Polygon::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
        assert!(line.is_degenerate());
        assert!(!line.contains(&Point2::new(0.5, 0.5)));

        let flat = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ]);
        assert!(flat.is_degenerate());
        assert!(!flat.contains(&Point2::new(1.0, 0.0)));
    }

    #[test]
    fn bowtie_contains_both_lobes() {
        let bowtie = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]);
        assert!(bowtie.signed_area().abs() < TOLERANCE);
        assert!(!bowtie.is_degenerate());
        assert!(bowtie.contains(&Point2::new(1.9, 1.0)));
        assert!(bowtie.contains(&Point2::new(0.1, 1.0)));
        assert!(!bowtie.contains(&Point2::new(1.0, 0.5)));
        assert!(!bowtie.contains(&Point2::new(1.0, 1.5)));
    }

    #[test]
    fn from_face_resolves_indices() {
        let verts = vec![
            Point2::new(5.0, 5.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        let tri = Polygon::from_face(&verts, &[1, 2, 3]).unwrap();
        assert_eq!(tri.vertices(), &verts[1..]);
    }

    #[test]
    fn from_face_rejects_bad_index() {
        let verts = vec![Point2::new(0.0, 0.0)];
        let err = Polygon::from_face(&verts, &[0, 4]).unwrap_err();
        assert!(matches!(
            err,
            crate::RoofError::Geometry(GeometryError::VertexIndexOutOfRange { index: 4, count: 1 })
        ));
    }
}
