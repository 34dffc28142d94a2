//! Error types and macros for aborting on fatal errors.

use crate::geometry::Dim2;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Result type used for fallible operations throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type aggregating the failure classes of the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] TemplateRenderError),
    #[error(transparent)]
    Config(#[from] ConfigValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Malformed or inconsistent grid or forcing input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("coordinate sequences have different lengths: {x_len} and {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[error("coordinate arrays have different shapes: {x_shape:?} and {y_shape:?}")]
    ShapeMismatch {
        x_shape: (usize, usize),
        y_shape: (usize, usize),
    },
    #[error("coordinate arrays are empty")]
    EmptyGrid,
    #[error("non-finite {axis}-coordinate at flat index {index}")]
    NonFiniteCoordinate { axis: Dim2, index: usize },
    #[error("invalid grid dimensions nx = {nx}, ny = {ny} (both must be at least 2)")]
    InvalidDimensions { nx: usize, ny: usize },
    #[error("invalid grid spacing dx = {dx}, dy = {dy} (both must be positive and finite)")]
    InvalidSpacing { dx: f64, dy: f64 },
    #[error("non-finite grid origin or rotation: x0 = {x0}, y0 = {y0}, rot = {rot}")]
    NonFiniteParameters { x0: f64, y0: f64, rot: f64 },
    #[error("could not interpret grid specification `{spec}`")]
    MalformedGridSpec { spec: String },
    #[error("{operation} is not supported for {grid_type} grids")]
    UnsupportedGridType {
        grid_type: &'static str,
        operation: &'static str,
    },
    #[error("could not read grid file {path}: {source}")]
    GridFileRead { path: PathBuf, source: io::Error },
    #[error("malformed grid file {path}: {reason}")]
    MalformedGridFile { path: PathBuf, reason: String },
    #[error("wave parameter series have inconsistent lengths")]
    InconsistentSeriesLengths,
    #[error("forcing field {index} has shape {found:?}, expected {expected:?}")]
    ForcingShapeMismatch {
        index: usize,
        found: (usize, usize),
        expected: (usize, usize),
    },
    #[error("no time steps available for forcing file {path}")]
    NoTimeSteps { path: PathBuf },
    #[error("invalid boundary sampling interval {0} (must be positive and finite)")]
    InvalidInterval(f64),
}

/// Unresolved placeholder or template read/write failure.
#[derive(Debug, Error)]
pub enum TemplateRenderError {
    #[error("unresolved placeholder `{{{{{name}}}}}` in {path} has no matching settings key")]
    UnresolvedPlaceholder { name: String, path: PathBuf },
    #[error("output directory {0} exists and is not empty")]
    OutputDirNotEmpty(PathBuf),
    #[error("template directory {0} does not exist")]
    MissingTemplateDir(PathBuf),
    #[error("could not parse settings file: {0}")]
    SettingsParse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Missing or invalid settings keys, collected into a single batch report.
#[derive(Debug, Error)]
#[error("invalid model settings:\n  - {}", problems.join("\n  - "))]
pub struct ConfigValidationError {
    problems: Vec<String>,
}

impl ConfigValidationError {
    /// Creates a batch report from the given problem descriptions.
    ///
    /// The list must be non-empty; an empty list means validation passed and
    /// no error should be constructed.
    pub fn new(problems: Vec<String>) -> Self {
        assert!(!problems.is_empty());
        Self { problems }
    }

    /// Returns the individual problem descriptions.
    pub fn problems(&self) -> &[String] {
        &self.problems
    }
}

/// Failure to load or query a catalog of data sources.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("data source `{0}` is not in the catalog")]
    SourceNotFound(String),
    #[error("duplicate data source name `{0}`")]
    DuplicateSource(String),
    #[error("could not parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

#[macro_export]
macro_rules! exit_on_false {
    ($logic:expr, $($print_arg:tt)*) => {
        if $logic {
            true
        } else {
            $crate::exit_with_error!($($print_arg)*)
        }
    };
}
