use crate::math::{Point3, Vector3};

/// A point cloud sample: position plus pass-through normal and color.
///
/// Only `position` takes part in plane fitting; `normal` and `color` are
/// carried along so selections keep every attribute of the original row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudPoint {
    pub position: Point3,
    pub normal: Vector3,
    pub color: [u8; 3],
}

impl CloudPoint {
    /// Creates a point with a zero normal and black color.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::zeros(),
            color: [0; 3],
        }
    }

    /// Sets the normal attribute.
    #[must_use]
    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = normal;
        self
    }

    /// Sets the color attribute.
    #[must_use]
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Builds a point from a numeric row `x, y, z, nx, ny, nz, r, g, b`.
    ///
    /// Color channels are rounded and clamped to `0..=255`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation/sign loss: channels are clamped to the u8 range first
    pub fn from_row(row: &[f64; 9]) -> Self {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self {
            position: Point3::new(row[0], row[1], row[2]),
            normal: Vector3::new(row[3], row[4], row[5]),
            color: [channel(row[6]), channel(row[7]), channel(row[8])],
        }
    }

    /// Returns the point as a numeric row `x, y, z, nx, ny, nz, r, g, b`.
    #[must_use]
    pub fn to_row(&self) -> [f64; 9] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.normal.x,
            self.normal.y,
            self.normal.z,
            f64::from(self.color[0]),
            f64::from(self.color[1]),
            f64::from(self.color[2]),
        ]
    }
}

/// Extracts the XYZ positions of a point cloud, preserving order.
#[must_use]
pub fn positions(points: &[CloudPoint]) -> Vec<Point3> {
    points.iter().map(|p| p.position).collect()
}

/// Builds a point cloud from N×9 numeric rows.
#[must_use]
pub fn cloud_from_rows(rows: &[[f64; 9]]) -> Vec<CloudPoint> {
    rows.iter().map(CloudPoint::from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_row_keeps_all_attributes() {
        let p = CloudPoint::from_row(&[1.0, 2.0, 3.0, 0.0, 0.6, 0.8, 12.0, 255.0, 300.0]);
        assert_eq!(p.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(p.normal, Vector3::new(0.0, 0.6, 0.8));
        assert_eq!(p.color, [12, 255, 255]);
    }

    #[test]
    fn row_round_trip_for_integral_colors() {
        let row = [0.5, -1.5, 7.25, 0.0, 0.0, 1.0, 10.0, 20.0, 30.0];
        assert_eq!(CloudPoint::from_row(&row).to_row(), row);
    }

    #[test]
    fn positions_preserve_order() {
        let cloud = vec![CloudPoint::new(1.0, 0.0, 0.0), CloudPoint::new(0.0, 2.0, 0.0)];
        let xyz = positions(&cloud);
        assert_eq!(xyz, vec![Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)]);
    }
}
