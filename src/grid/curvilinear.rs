//! Reading of Deltares-style curvilinear SWAN grid files.

use super::{fgr, BaseGrid};
use crate::error::ValidationError;
use crate::io::utils::read_text_file;
use ndarray::Array2;
use std::path::Path;

/// Reads a curvilinear grid file into a structured grid with `nx` by `ny`
/// vertices.
///
/// The file holds the x- and y-coordinates of all vertices as
/// whitespace-separated values under the section headers `x-coordinates`
/// and `y-coordinates`.
pub fn read_curvilinear_grid(path: &Path, nx: usize, ny: usize) -> Result<BaseGrid, ValidationError> {
    let text = read_text_file(path).map_err(|source| ValidationError::GridFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let malformed = |reason: String| ValidationError::MalformedGridFile {
        path: path.to_path_buf(),
        reason,
    };

    let lines: Vec<&str> = text.lines().collect();
    let x_start = lines
        .iter()
        .position(|line| line.trim() == "x-coordinates")
        .ok_or_else(|| malformed("x-coordinates section not found".to_string()))?;
    let y_start = lines
        .iter()
        .position(|line| line.trim() == "y-coordinates")
        .ok_or_else(|| malformed("y-coordinates section not found".to_string()))?;
    if y_start < x_start {
        return Err(malformed(
            "y-coordinates section precedes x-coordinates section".to_string(),
        ));
    }

    let parse_section = |section: &[&str], name: &str| -> Result<Vec<fgr>, ValidationError> {
        let mut values = Vec::with_capacity(nx * ny);
        for line in section {
            for word in line.split_whitespace() {
                let value = word.parse::<fgr>().map_err(|err| {
                    malformed(format!("failed parsing `{}` in {} section: {}", word, name, err))
                })?;
                values.push(value);
            }
        }
        if values.len() != nx * ny {
            return Err(malformed(format!(
                "{} section holds {} values, expected {}x{} = {}",
                name,
                values.len(),
                nx,
                ny,
                nx * ny
            )));
        }
        Ok(values)
    };

    let x = parse_section(&lines[x_start + 1..y_start], "x-coordinates")?;
    let y = parse_section(&lines[y_start + 1..], "y-coordinates")?;

    let x = Array2::from_shape_vec((ny, nx), x).expect("Length verified above");
    let y = Array2::from_shape_vec((ny, nx), y).expect("Length verified above");
    BaseGrid::from_coords(x, y)
}
