use crate::geometry::{CloudPoint, Polygon};
use crate::math::Point2;

/// Selects the cloud points whose XY projection falls inside a polygon.
///
/// Boundary points count as inside. Selection keeps the original relative
/// order and every point attribute.
pub struct Lasso<'a> {
    polygon: &'a Polygon,
}

impl<'a> Lasso<'a> {
    /// Creates a new `Lasso` over `polygon`.
    #[must_use]
    pub fn new(polygon: &'a Polygon) -> Self {
        Self { polygon }
    }

    /// Returns `true` if the XY projection of `point` lies in the polygon.
    #[must_use]
    pub fn selects(&self, point: &CloudPoint) -> bool {
        self.polygon
            .contains(&Point2::new(point.position.x, point.position.y))
    }

    /// Returns the indices of the selected points in ascending order.
    #[must_use]
    pub fn indices(&self, cloud: &[CloudPoint]) -> Vec<usize> {
        if self.polygon.is_degenerate() {
            return Vec::new();
        }
        cloud
            .iter()
            .enumerate()
            .filter(|(_, p)| self.selects(p))
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns copies of the selected points.
    #[must_use]
    pub fn execute(&self, cloud: &[CloudPoint]) -> Vec<CloudPoint> {
        if self.polygon.is_degenerate() {
            return Vec::new();
        }
        cloud.iter().filter(|p| self.selects(p)).copied().collect()
    }
}

/// Lassos the points of `cloud` with `polygon`.
#[must_use]
pub fn lasso_points(polygon: &Polygon, cloud: &[CloudPoint]) -> Vec<CloudPoint> {
    Lasso::new(polygon).execute(cloud)
}

/// Index mask form of [`lasso_points`].
#[must_use]
pub fn lasso_indices(polygon: &Polygon, cloud: &[CloudPoint]) -> Vec<usize> {
    Lasso::new(polygon).indices(cloud)
}
