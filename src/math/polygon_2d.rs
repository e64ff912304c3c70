use super::Point2;

/// Computes the signed area of a 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Sum of the absolute triangle-fan areas around the first vertex.
///
/// Unlike [`signed_area_2d`], lobes of a self-intersecting ring do not
/// cancel, so the result is zero only when every vertex is collinear.
#[must_use]
pub fn fan_area_2d(points: &[Point2]) -> f64 {
    let Some((origin, rest)) = points.split_first() else {
        return 0.0;
    };
    rest.windows(2)
        .map(|w| {
            let (u, v) = (w[0] - *origin, w[1] - *origin);
            (u.x * v.y - u.y * v.x).abs()
        })
        .sum::<f64>()
        * 0.5
}

/// Returns `true` if `p` lies exactly on the closed segment `a`–`b`.
///
/// No tolerance is applied: the point must be collinear with the segment
/// and inside its bounding box.
#[must_use]
pub fn point_on_segment_2d(p: &Point2, a: &Point2, b: &Point2) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross.abs() > 0.0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Even-odd ray casting test for `p` against the closed ring `verts`.
///
/// Casts a ray towards +x and counts edge crossings. Points on the
/// boundary may land on either side; use [`point_on_segment_2d`] to
/// resolve them.
#[must_use]
pub fn crossing_parity_2d(p: &Point2, verts: &[Point2]) -> bool {
    let n = verts.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (vi, vj) = (&verts[i], &verts[j]);
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
