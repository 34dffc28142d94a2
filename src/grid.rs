//! Spatial grids describing wave model domains.

pub mod curvilinear;
pub mod regular;
pub mod unstructured;

use crate::error::ValidationError;
use crate::geometry::{project_onto_segment, BoundingBox, Dim2, Point2};
use crate::spectra::SpectralSites;
use ndarray::{Array1, Array2};

/// Floating-point precision used for grid coordinates.
#[allow(non_camel_case_types)]
pub type fgr = f64;

/// Topology of the grid vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridTopology {
    Structured,
    Unstructured,
}

/// Defines the properties of a horizontal model grid.
///
/// A grid is the minimum spatial representation of a model domain: a set of
/// vertex coordinates, the bounding box enclosing them and a closed boundary
/// polygon. No knowledge of the grid connectivity is assumed.
pub trait Grid2 {
    /// The topology of the grid vertices.
    fn topology(&self) -> GridTopology;

    /// Returns the flattened x-coordinates of all grid vertices.
    fn x(&self) -> &Array1<fgr>;

    /// Returns the flattened y-coordinates of all grid vertices.
    fn y(&self) -> &Array1<fgr>;

    /// Returns the ordered vertices of the boundary polygon, without the
    /// closing vertex.
    fn boundary_points(&self) -> Vec<Point2<fgr>>;

    /// Returns the number of grid vertices.
    fn vertex_count(&self) -> usize {
        self.x().len()
    }

    /// Returns the bounding box of all grid vertices, expanded by the given
    /// buffer on all sides.
    fn bbox(&self, buffer: fgr) -> BoundingBox<fgr> {
        let points = self
            .x()
            .iter()
            .zip(self.y())
            .map(|(&x, &y)| Point2::new(x, y));
        BoundingBox::from_points(points)
            .expect("Grid constructors reject empty coordinate arrays")
            .expanded(buffer)
    }

    /// Returns the closed boundary polygon, with the first vertex repeated
    /// at the end.
    fn boundary(&self) -> Vec<Point2<fgr>> {
        let mut ring = self.boundary_points();
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        ring
    }

    /// Selects the spectral sites located within `tolerance` of the grid
    /// boundary.
    ///
    /// Sites are visited in dataset order and each site is included at most
    /// once, carrying the projection of its location onto the nearest point
    /// of the boundary. Growing the tolerance can only grow the selection.
    fn nearby_spectra(&self, sites: &SpectralSites, tolerance: fgr) -> SpectralSites {
        let ring = self.boundary();
        let mut selected = Vec::new();
        for site in sites.iter() {
            let location = site.location();
            let mut nearest: Option<(Point2<fgr>, fgr)> = None;
            for segment in ring.windows(2) {
                let (point, dist) = project_onto_segment(&segment[0], &segment[1], &location);
                if nearest.map_or(true, |(_, best)| dist < best) {
                    nearest = Some((point, dist));
                }
            }
            if let Some((point, dist)) = nearest {
                if dist <= tolerance {
                    selected.push(site.clone().projected_onto(point));
                }
            }
        }
        SpectralSites::from_sites(selected)
    }
}

/// Structured grid holding the vertex coordinates of a (possibly curvilinear)
/// rectangular mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseGrid {
    x: Array1<fgr>,
    y: Array1<fgr>,
    shape: (usize, usize),
}

impl BaseGrid {
    /// Creates a grid from 2D x- and y-coordinate arrays of equal shape,
    /// with rows indexing the y-direction and columns the x-direction.
    pub fn from_coords(x: Array2<fgr>, y: Array2<fgr>) -> Result<Self, ValidationError> {
        if x.dim() != y.dim() {
            return Err(ValidationError::ShapeMismatch {
                x_shape: x.dim(),
                y_shape: y.dim(),
            });
        }
        if x.is_empty() {
            return Err(ValidationError::EmptyGrid);
        }
        let shape = x.dim();
        let x = Array1::from_iter(x.iter().copied());
        let y = Array1::from_iter(y.iter().copied());
        for (axis, coords) in [(Dim2::X, &x), (Dim2::Y, &y)] {
            if let Some(index) = coords.iter().position(|value| !value.is_finite()) {
                return Err(ValidationError::NonFiniteCoordinate { axis, index });
            }
        }
        Ok(Self { x, y, shape })
    }

    /// Returns the (rows, columns) shape of the vertex arrays.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    fn vertex(&self, row: usize, col: usize) -> Point2<fgr> {
        let index = row * self.shape.1 + col;
        Point2::new(self.x[index], self.y[index])
    }
}

impl Grid2 for BaseGrid {
    fn topology(&self) -> GridTopology {
        GridTopology::Structured
    }

    fn x(&self) -> &Array1<fgr> {
        &self.x
    }

    fn y(&self) -> &Array1<fgr> {
        &self.y
    }

    /// Traces the rectangular perimeter of the vertex arrays in index order:
    /// first row left to right, last column downwards, last row right to
    /// left, first column upwards.
    fn boundary_points(&self) -> Vec<Point2<fgr>> {
        let (rows, cols) = self.shape;
        let mut ring = Vec::with_capacity(2 * (rows + cols));
        if rows == 1 {
            ring.extend((0..cols).map(|col| self.vertex(0, col)));
            return ring;
        }
        if cols == 1 {
            ring.extend((0..rows).map(|row| self.vertex(row, 0)));
            return ring;
        }
        ring.extend((0..cols).map(|col| self.vertex(0, col)));
        ring.extend((1..rows).map(|row| self.vertex(row, cols - 1)));
        ring.extend((0..cols - 1).rev().map(|col| self.vertex(rows - 1, col)));
        ring.extend((1..rows - 1).rev().map(|row| self.vertex(row, 0)));
        ring
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::spectra::SpectralSite;
    use ndarray::array;

    fn meshgrid(nx: usize, ny: usize) -> (Array2<fgr>, Array2<fgr>) {
        let x = Array2::from_shape_fn((ny, nx), |(_, i)| i as fgr);
        let y = Array2::from_shape_fn((ny, nx), |(j, _)| j as fgr);
        (x, y)
    }

    #[test]
    fn construction_rejects_inconsistent_coords() {
        let (x, _) = meshgrid(3, 3);
        let (_, y) = meshgrid(3, 4);
        assert!(matches!(
            BaseGrid::from_coords(x, y),
            Err(ValidationError::ShapeMismatch { .. })
        ));

        let x = Array2::from_elem((0, 0), 0.0);
        let y = Array2::from_elem((0, 0), 0.0);
        assert!(matches!(
            BaseGrid::from_coords(x, y),
            Err(ValidationError::EmptyGrid)
        ));

        let x = array![[0.0, fgr::NAN], [0.0, 1.0]];
        let y = array![[0.0, 0.0], [1.0, 1.0]];
        assert!(matches!(
            BaseGrid::from_coords(x, y),
            Err(ValidationError::NonFiniteCoordinate {
                axis: Dim2::X,
                index: 1
            })
        ));
    }

    #[test]
    fn bbox_is_exact_min_max_of_inputs() {
        let (x, y) = meshgrid(10, 10);
        let grid = BaseGrid::from_coords(x, y).unwrap();
        let bounds = grid.bbox(0.0);
        assert_eq!(bounds, BoundingBox::new(0.0, 0.0, 9.0, 9.0));
        assert_eq!(grid.bbox(0.1), BoundingBox::new(-0.1, -0.1, 9.1, 9.1));
    }

    #[test]
    fn two_by_two_boundary_matches_vertex_ring() {
        let (x, y) = meshgrid(2, 2);
        let grid = BaseGrid::from_coords(x, y).unwrap();
        assert_eq!(grid.bbox(0.0), BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(
            grid.boundary_points(),
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ]
        );
        let closed = grid.boundary();
        assert_eq!(closed.len(), 5);
        assert_eq!(closed[0], closed[4]);
    }

    #[test]
    fn boundary_trace_is_a_simple_polygon() {
        let (x, y) = meshgrid(5, 3);
        let grid = BaseGrid::from_coords(x, y).unwrap();
        let ring = grid.boundary_points();
        assert_eq!(ring.len(), 2 * (5 + 3) - 4);
        // Perimeter vertices are distinct when the trace does not self-intersect.
        for (i, a) in ring.iter().enumerate() {
            for b in ring.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn degenerate_single_row_boundary_is_the_row() {
        let (x, y) = meshgrid(4, 1);
        let grid = BaseGrid::from_coords(x, y).unwrap();
        let ring = grid.boundary_points();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], Point2::new(0.0, 0.0));
        assert_eq!(ring[3], Point2::new(3.0, 0.0));
    }

    fn test_sites() -> SpectralSites {
        SpectralSites::from_sites(vec![
            SpectralSite::new("on_corner", 0.0, 0.0),
            SpectralSite::new("off_by_half", 4.5, 1.0),
            SpectralSite::new("far_away", 20.0, 20.0),
        ])
    }

    #[test]
    fn zero_tolerance_selects_only_exact_matches() {
        let (x, y) = meshgrid(5, 3);
        let grid = BaseGrid::from_coords(x, y).unwrap();
        let selected = grid.nearby_spectra(&test_sites(), 0.0);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.iter().next().unwrap().id(), "on_corner");
    }

    #[test]
    fn growing_tolerance_never_shrinks_the_selection() {
        let (x, y) = meshgrid(5, 3);
        let grid = BaseGrid::from_coords(x, y).unwrap();
        let sites = test_sites();
        let mut previous = 0;
        for tolerance in [0.0, 0.4, 0.6, 30.0] {
            let selected = grid.nearby_spectra(&sites, tolerance);
            assert!(selected.len() >= previous);
            previous = selected.len();
        }
        assert_eq!(previous, 3);
    }

    #[test]
    fn selection_preserves_order_and_has_no_duplicates() {
        let (x, y) = meshgrid(5, 3);
        let grid = BaseGrid::from_coords(x, y).unwrap();
        let selected = grid.nearby_spectra(&test_sites(), 1.0);
        let ids: Vec<_> = selected.iter().map(|site| site.id().to_string()).collect();
        assert_eq!(ids, vec!["on_corner", "off_by_half"]);
    }

    #[test]
    fn selected_sites_are_projected_onto_the_boundary() {
        let (x, y) = meshgrid(5, 3);
        let grid = BaseGrid::from_coords(x, y).unwrap();
        let selected = grid.nearby_spectra(&test_sites(), 1.0);
        let projected = selected.iter().nth(1).unwrap();
        let boundary_point = projected.boundary_point().unwrap();
        assert_eq!(boundary_point, Point2::new(4.0, 1.0));
    }
}
