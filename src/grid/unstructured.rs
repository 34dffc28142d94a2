//! Unstructured point-cloud grids.

use super::{fgr, Grid2, GridTopology};
use crate::error::ValidationError;
use crate::geometry::{cross_product_z, Dim2, Point2};
use ndarray::Array1;

/// Grid defined by an unordered set of vertices with no assumed connectivity.
///
/// The boundary polygon is the convex hull of the vertex set, computed once
/// at construction.
#[derive(Clone, Debug)]
pub struct UnstructuredGrid {
    x: Array1<fgr>,
    y: Array1<fgr>,
    hull: Vec<Point2<fgr>>,
}

impl UnstructuredGrid {
    /// Creates a grid from two equal-length coordinate sequences.
    pub fn from_points(x: Array1<fgr>, y: Array1<fgr>) -> Result<Self, ValidationError> {
        if x.len() != y.len() {
            return Err(ValidationError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.is_empty() {
            return Err(ValidationError::EmptyGrid);
        }
        for (axis, coords) in [(Dim2::X, &x), (Dim2::Y, &y)] {
            if let Some(index) = coords.iter().position(|value| !value.is_finite()) {
                return Err(ValidationError::NonFiniteCoordinate { axis, index });
            }
        }
        let points: Vec<_> = x
            .iter()
            .zip(&y)
            .map(|(&x, &y)| Point2::new(x, y))
            .collect();
        let hull = convex_hull(&points);
        Ok(Self { x, y, hull })
    }
}

impl Grid2 for UnstructuredGrid {
    fn topology(&self) -> GridTopology {
        GridTopology::Unstructured
    }

    fn x(&self) -> &Array1<fgr> {
        &self.x
    }

    fn y(&self) -> &Array1<fgr> {
        &self.y
    }

    fn boundary_points(&self) -> Vec<Point2<fgr>> {
        self.hull.clone()
    }
}

/// Computes the convex hull of the given points with Andrew's monotone chain,
/// in counterclockwise order starting from the lowest-leftmost vertex.
///
/// Collinear points on hull edges are dropped, so the result is the minimal
/// vertex set. Duplicate input points are handled.
fn convex_hull(points: &[Point2<fgr>]) -> Vec<Point2<fgr>> {
    let mut sorted: Vec<Point2<fgr>> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .expect("Non-finite coordinates rejected at construction")
            .then(
                a.y.partial_cmp(&b.y)
                    .expect("Non-finite coordinates rejected at construction"),
            )
    });
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<Point2<fgr>> = Vec::new();
    for &point in &sorted {
        while lower.len() >= 2
            && cross_product_z(&lower[lower.len() - 2], &lower[lower.len() - 1], &point) <= 0.0
        {
            lower.pop();
        }
        lower.push(point);
    }

    let mut upper: Vec<Point2<fgr>> = Vec::new();
    for &point in sorted.iter().rev() {
        while upper.len() >= 2
            && cross_product_z(&upper[upper.len() - 2], &upper[upper.len() - 1], &point) <= 0.0
        {
            upper.pop();
        }
        upper.push(point);
    }

    // The last vertex of each chain repeats the first of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::geometry::BoundingBox;
    use ndarray::array;

    #[test]
    fn construction_rejects_unequal_lengths() {
        assert!(matches!(
            UnstructuredGrid::from_points(array![0.0, 1.0], array![0.0]),
            Err(ValidationError::LengthMismatch { x_len: 2, y_len: 1 })
        ));
    }

    #[test]
    fn hull_excludes_interior_points() {
        let grid = UnstructuredGrid::from_points(
            array![0.0, 2.0, 2.0, 0.0, 1.0],
            array![0.0, 0.0, 2.0, 2.0, 1.0],
        )
        .unwrap();
        assert_eq!(
            grid.boundary_points(),
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(0.0, 2.0),
            ]
        );
        assert_eq!(grid.bbox(0.0), BoundingBox::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn hull_drops_collinear_edge_points() {
        let grid = UnstructuredGrid::from_points(
            array![0.0, 1.0, 2.0, 2.0, 0.0],
            array![0.0, 0.0, 0.0, 1.0, 1.0],
        )
        .unwrap();
        assert_eq!(grid.boundary_points().len(), 4);
    }

    #[test]
    fn hull_is_deterministic_for_identical_input() {
        let build = || {
            UnstructuredGrid::from_points(
                array![3.0, 0.0, 1.0, 2.0, 2.5],
                array![0.5, 0.0, 2.0, 1.0, 0.1],
            )
            .unwrap()
            .boundary_points()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn degenerate_point_sets_keep_all_distinct_points() {
        let grid = UnstructuredGrid::from_points(array![1.0, 1.0], array![2.0, 2.0]).unwrap();
        assert_eq!(grid.boundary_points(), vec![Point2::new(1.0, 2.0)]);

        let grid = UnstructuredGrid::from_points(array![0.0, 1.0], array![0.0, 1.0]).unwrap();
        assert_eq!(grid.boundary_points().len(), 2);
    }
}
