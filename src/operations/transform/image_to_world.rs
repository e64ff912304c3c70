use crate::math::Point2;

/// Maps pixel coordinates of an aligned aerial image to world XY.
///
/// The point cloud shares the image footprint: the world origin sits at
/// the sub-pixel image center and world +Y points up, whereas pixel rows
/// grow downwards. Pixel coordinates are `(column, row)`.
#[derive(Debug, Clone, Copy)]
pub struct ImageToWorld {
    pixels_per_meter: f64,
    center: Point2,
}

impl ImageToWorld {
    /// Creates a transform for an image of `rows` x `cols` pixels.
    ///
    /// `pixels_per_meter` must be positive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision loss: image dimensions beyond 2^52 are unsupported
    pub fn new(pixels_per_meter: f64, rows: usize, cols: usize) -> Self {
        debug_assert!(pixels_per_meter > 0.0, "pixels_per_meter must be positive");
        let center = Point2::new((cols as f64 - 1.0) / 2.0, (rows as f64 - 1.0) / 2.0);
        Self {
            pixels_per_meter,
            center,
        }
    }

    /// Creates a transform from an image shape `(rows, cols)`.
    #[must_use]
    pub fn from_shape(pixels_per_meter: f64, (rows, cols): (usize, usize)) -> Self {
        Self::new(pixels_per_meter, rows, cols)
    }

    /// Returns the sub-pixel image center as `(column, row)`.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Converts a single pixel coordinate to world coordinates.
    #[must_use]
    pub fn apply(&self, pixel: &Point2) -> Point2 {
        let dx = pixel.x - self.center.x;
        let dy = -(pixel.y - self.center.y);
        Point2::new(dx / self.pixels_per_meter, dy / self.pixels_per_meter)
    }

    /// Converts every pixel coordinate, preserving count and order.
    #[must_use]
    pub fn execute(&self, pixels: &[Point2]) -> Vec<Point2> {
        pixels.iter().map(|p| self.apply(p)).collect()
    }
}

/// Converts pixel coordinates to world coordinates for an image of
/// `image_shape = (rows, cols)` at `ppm` pixels per meter.
#[must_use]
pub fn image_to_world(pixels: &[Point2], ppm: f64, image_shape: (usize, usize)) -> Vec<Point2> {
    ImageToWorld::from_shape(ppm, image_shape).execute(pixels)
}
