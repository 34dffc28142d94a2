//! Geometric utility objects.

use crate::num::CoordFloat;
use std::fmt;

/// Denotes the x- or y-dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dim2 {
    X = 0,
    Y = 1,
}

impl fmt::Display for Dim2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::X => "x",
                Self::Y => "y",
            }
        )
    }
}

/// A point in the horizontal plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: CoordFloat> Point2<F> {
    /// Creates a new point with the given coordinates.
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Returns the Euclidean distance to the given point.
    pub fn distance_to(&self, other: &Self) -> F {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl<F: CoordFloat> fmt::Display for Point2<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle bounding a set of points in the horizontal plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<F> {
    min_x: F,
    min_y: F,
    max_x: F,
    max_y: F,
}

impl<F: CoordFloat> BoundingBox<F> {
    /// Creates a new bounding box with the given bounds.
    pub fn new(min_x: F, min_y: F, max_x: F, max_y: F) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Computes the tightest box containing all the given points,
    /// or `None` if the iterator is empty.
    pub fn from_points<I: IntoIterator<Item = Point2<F>>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for point in points {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.max_y = bounds.max_y.max(point.y);
        }
        Some(bounds)
    }

    /// Returns a copy of the box expanded by the given buffer on all sides.
    pub fn expanded(&self, buffer: F) -> Self {
        Self::new(
            self.min_x - buffer,
            self.min_y - buffer,
            self.max_x + buffer,
            self.max_y + buffer,
        )
    }

    /// Whether the given point lies inside or on the edge of the box.
    pub fn contains(&self, point: &Point2<F>) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns the lower x-bound.
    pub fn min_x(&self) -> F {
        self.min_x
    }

    /// Returns the lower y-bound.
    pub fn min_y(&self) -> F {
        self.min_y
    }

    /// Returns the upper x-bound.
    pub fn max_x(&self) -> F {
        self.max_x
    }

    /// Returns the upper y-bound.
    pub fn max_y(&self) -> F {
        self.max_y
    }
}

/// Finds the point on the segment from `a` to `b` closest to `p`,
/// together with its distance to `p`.
///
/// A zero-length segment degenerates to the distance to `a`.
pub fn project_onto_segment<F: CoordFloat>(
    a: &Point2<F>,
    b: &Point2<F>,
    p: &Point2<F>,
) -> (Point2<F>, F) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == F::zero() {
        return (*a, a.distance_to(p));
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.max(F::zero()).min(F::one());
    let nearest = Point2::new(a.x + t * dx, a.y + t * dy);
    let dist = nearest.distance_to(p);
    (nearest, dist)
}

/// Returns twice the signed area of the triangle spanned by the three points.
///
/// Positive for a counterclockwise turn at `b`.
pub fn cross_product_z<F: CoordFloat>(a: &Point2<F>, b: &Point2<F>, c: &Point2<F>) -> F {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bounding_box_covers_all_points() {
        let points = [
            Point2::new(1.0, -2.0),
            Point2::new(-3.0, 4.0),
            Point2::new(0.5, 0.5),
        ];
        let bounds = BoundingBox::from_points(points).unwrap();
        assert_eq!(bounds, BoundingBox::new(-3.0, -2.0, 1.0, 4.0));
        assert!(points.iter().all(|point| bounds.contains(point)));
        assert!(BoundingBox::<f64>::from_points([]).is_none());
    }

    #[test]
    fn bounding_box_expansion_is_symmetric() {
        let bounds = BoundingBox::new(0.0, 0.0, 1.0, 1.0).expanded(0.5);
        assert_eq!(bounds, BoundingBox::new(-0.5, -0.5, 1.5, 1.5));
    }

    #[test]
    fn projection_clamps_to_segment_ends() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);

        let (nearest, dist) = project_onto_segment(&a, &b, &Point2::new(0.5, 1.0));
        assert_abs_diff_eq!(nearest.x, 0.5);
        assert_abs_diff_eq!(nearest.y, 0.0);
        assert_abs_diff_eq!(dist, 1.0);

        let (nearest, dist) = project_onto_segment(&a, &b, &Point2::new(2.0, 0.0));
        assert_abs_diff_eq!(nearest.x, 1.0);
        assert_abs_diff_eq!(dist, 1.0);

        let (nearest, dist) = project_onto_segment(&a, &a, &Point2::new(0.0, 3.0));
        assert_abs_diff_eq!(nearest.x, 0.0);
        assert_abs_diff_eq!(dist, 3.0);
    }
}
