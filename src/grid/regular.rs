//! Structured grids with uniform spacing, generated from origin, spacing,
//! vertex counts and a rotation angle.

use super::{fgr, BaseGrid, Grid2, GridTopology};
use crate::error::ValidationError;
use crate::geometry::Point2;
use ndarray::{Array1, Array2};

/// Regular (possibly rotated) structured grid.
///
/// `nx` and `ny` count meshes, so the vertex arrays hold `nx + 1` by
/// `ny + 1` points and the grid spans `dx * nx` by `dy * ny`. The arrays
/// are generated deterministically from the parameters: a uniform mesh at
/// the origin, rotated counterclockwise by `rot` degrees and translated to
/// `(x0, y0)`.
#[derive(Clone, Debug)]
pub struct RegularGrid {
    x0: fgr,
    y0: fgr,
    rot: fgr,
    dx: fgr,
    dy: fgr,
    nx: usize,
    ny: usize,
    base: BaseGrid,
}

impl RegularGrid {
    /// Creates a regular grid with `nx` by `ny` meshes spaced `dx` by `dy`
    /// apart, rotated by `rot` degrees around the origin `(x0, y0)`.
    pub fn new(
        x0: fgr,
        y0: fgr,
        rot: fgr,
        dx: fgr,
        dy: fgr,
        nx: usize,
        ny: usize,
    ) -> Result<Self, ValidationError> {
        if nx < 2 || ny < 2 {
            return Err(ValidationError::InvalidDimensions { nx, ny });
        }
        if !(dx.is_finite() && dy.is_finite() && dx > 0.0 && dy > 0.0) {
            return Err(ValidationError::InvalidSpacing { dx, dy });
        }
        if !(x0.is_finite() && y0.is_finite() && rot.is_finite()) {
            return Err(ValidationError::NonFiniteParameters { x0, y0, rot });
        }

        let (sin, cos) = rot.to_radians().sin_cos();
        let (rows, cols) = (ny + 1, nx + 1);
        let mut x = Vec::with_capacity(rows * cols);
        let mut y = Vec::with_capacity(rows * cols);
        for j in 0..rows {
            for i in 0..cols {
                let xi = i as fgr * dx;
                let yj = j as fgr * dy;
                x.push(x0 + xi * cos - yj * sin);
                y.push(y0 + xi * sin + yj * cos);
            }
        }
        let x = Array2::from_shape_vec((rows, cols), x).expect("Consistent shape");
        let y = Array2::from_shape_vec((rows, cols), y).expect("Consistent shape");
        let base = BaseGrid::from_coords(x, y)?;

        Ok(Self {
            x0,
            y0,
            rot,
            dx,
            dy,
            nx,
            ny,
            base,
        })
    }

    /// Returns the x-coordinate of the grid origin.
    pub fn x0(&self) -> fgr {
        self.x0
    }

    /// Returns the y-coordinate of the grid origin.
    pub fn y0(&self) -> fgr {
        self.y0
    }

    /// Returns the rotation angle in degrees.
    pub fn rot(&self) -> fgr {
        self.rot
    }

    /// Returns the vertex spacing in the x-direction.
    pub fn dx(&self) -> fgr {
        self.dx
    }

    /// Returns the vertex spacing in the y-direction.
    pub fn dy(&self) -> fgr {
        self.dy
    }

    /// Returns the number of meshes in the x-direction.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Returns the number of meshes in the y-direction.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Returns the underlying structured vertex grid.
    pub fn base(&self) -> &BaseGrid {
        &self.base
    }
}

impl Grid2 for RegularGrid {
    fn topology(&self) -> GridTopology {
        GridTopology::Structured
    }

    fn x(&self) -> &Array1<fgr> {
        self.base.x()
    }

    fn y(&self) -> &Array1<fgr> {
        self.base.y()
    }

    fn boundary_points(&self) -> Vec<Point2<fgr>> {
        self.base.boundary_points()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::geometry::BoundingBox;
    use approx::assert_abs_diff_eq;

    #[test]
    fn unrotated_grid_matches_a_plain_meshgrid() {
        let grid = RegularGrid::new(0.0, 0.0, 0.0, 1.0, 1.0, 10, 10).unwrap();
        // Mesh counts, so one more vertex than meshes per direction.
        assert_eq!(grid.vertex_count(), 121);
        assert_eq!(grid.bbox(0.0), BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        // Row-major: the second vertex steps in x, the twelfth in y.
        assert_abs_diff_eq!(grid.x()[1], 1.0);
        assert_abs_diff_eq!(grid.y()[1], 0.0);
        assert_abs_diff_eq!(grid.x()[11], 0.0);
        assert_abs_diff_eq!(grid.y()[11], 1.0);
    }

    #[test]
    fn grid_spans_the_mesh_extent() {
        let grid = RegularGrid::new(0.0, 0.0, 0.0, 0.001, 0.001, 390, 150).unwrap();
        let bounds = grid.bbox(0.0);
        assert_eq!(bounds.max_x(), grid.dx() * grid.nx() as fgr);
        assert_eq!(bounds.max_y(), grid.dy() * grid.ny() as fgr);
        assert_eq!(bounds.max_x(), 0.39);
        assert_eq!(bounds.max_y(), 0.15);
    }

    #[test]
    fn rotation_by_ninety_degrees_swaps_the_axes() {
        let grid = RegularGrid::new(0.0, 0.0, 90.0, 1.0, 1.0, 3, 2).unwrap();
        // The x-axis of the mesh maps onto the positive y-axis.
        assert_abs_diff_eq!(grid.x()[3], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.y()[3], 3.0, epsilon = 1e-12);
        // The y-axis of the mesh maps onto the negative x-axis.
        assert_abs_diff_eq!(grid.x()[4], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.y()[4], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn translation_offsets_every_vertex() {
        let grid = RegularGrid::new(115.68, -32.76, 0.0, 0.5, 0.5, 3, 3).unwrap();
        assert_abs_diff_eq!(grid.x()[0], 115.68);
        assert_abs_diff_eq!(grid.y()[0], -32.76);
        assert_abs_diff_eq!(grid.x()[15], 115.68 + 1.5);
        assert_abs_diff_eq!(grid.y()[15], -32.76 + 1.5);
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        assert!(matches!(
            RegularGrid::new(0.0, 0.0, 0.0, 1.0, 1.0, 1, 10),
            Err(ValidationError::InvalidDimensions { nx: 1, ny: 10 })
        ));
        assert!(matches!(
            RegularGrid::new(0.0, 0.0, 0.0, 0.0, 1.0, 10, 10),
            Err(ValidationError::InvalidSpacing { .. })
        ));
        assert!(matches!(
            RegularGrid::new(0.0, 0.0, 0.0, -1.0, 1.0, 10, 10),
            Err(ValidationError::InvalidSpacing { .. })
        ));
        assert!(matches!(
            RegularGrid::new(fgr::NAN, 0.0, 0.0, 1.0, 1.0, 10, 10),
            Err(ValidationError::NonFiniteParameters { .. })
        ));
    }
}
