//! SWAN-specific grids, settings validation and command strings.

pub mod forcing;

use crate::error::{ConfigValidationError, ValidationError};
use crate::geometry::Point2;
use crate::grid::{
    curvilinear::read_curvilinear_grid, fgr, regular::RegularGrid, BaseGrid, Grid2, GridTopology,
};
use crate::model::SolverConfig;
use crate::template::Settings;
use lazy_static::lazy_static;
use ndarray::Array1;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

/// Friction schemes accepted by the SWAN `FRICTION` command.
pub const FRICTION_SCHEMES: [&str; 4] = ["JON", "COLL", "MAD", "RIP"];

lazy_static! {
    /// Matches a regular grid specification of the form
    /// `REG x0 y0 rot nx ny dx dy [EXC exc]`.
    static ref REGULAR_SPEC_REGEX: Regex = Regex::new(
        r"(?x)^REG
          \s+(?P<x0>\S+)\s+(?P<y0>\S+)\s+(?P<rot>\S+)
          \s+(?P<nx>\d+)\s+(?P<ny>\d+)
          \s+(?P<dx>\S+)\s+(?P<dy>\S+)
          (?:\s+EXC\s+(?P<exc>\S+))?\s*$"
    )
    .unwrap();
}

/// A SWAN computational or input grid.
///
/// The variants mirror the grid types SWAN accepts in its control file:
/// regular rotated grids defined inline, and curvilinear grids read from a
/// separate grid file.
#[derive(Clone, Debug)]
pub enum SwanGrid {
    Regular {
        grid: RegularGrid,
        exc: Option<fgr>,
    },
    Curvilinear {
        grid: BaseGrid,
        gridfile: String,
        exc: Option<fgr>,
    },
}

impl SwanGrid {
    /// Creates a regular SWAN grid from origin, rotation, mesh counts and
    /// spacing.
    pub fn regular(
        x0: fgr,
        y0: fgr,
        rot: fgr,
        dx: fgr,
        dy: fgr,
        nx: usize,
        ny: usize,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Regular {
            grid: RegularGrid::new(x0, y0, rot, dx, dy, nx, ny)?,
            exc: None,
        })
    }

    /// Creates a curvilinear SWAN grid by reading a Deltares-style grid file.
    pub fn from_gridfile(path: &Path, nx: usize, ny: usize) -> Result<Self, ValidationError> {
        let grid = read_curvilinear_grid(path, nx, ny)?;
        Ok(Self::Curvilinear {
            grid,
            gridfile: path.to_string_lossy().into_owned(),
            exc: None,
        })
    }

    /// Parses a SWAN grid specification string such as
    /// `REG 115.68 -32.76 77 390 150 0.001 0.001 EXC -99.0`.
    pub fn from_spec(spec: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedGridSpec {
            spec: spec.to_string(),
        };
        let captures = REGULAR_SPEC_REGEX.captures(spec.trim()).ok_or_else(malformed)?;
        let float = |name: &str| -> Result<fgr, ValidationError> {
            captures[name].parse::<fgr>().map_err(|_| malformed())
        };
        let count = |name: &str| -> Result<usize, ValidationError> {
            captures[name].parse::<usize>().map_err(|_| malformed())
        };
        let mut grid = Self::regular(
            float("x0")?,
            float("y0")?,
            float("rot")?,
            float("dx")?,
            float("dy")?,
            count("nx")?,
            count("ny")?,
        )?;
        if captures.name("exc").is_some() {
            grid = grid.with_exc(float("exc")?);
        }
        Ok(grid)
    }

    /// Sets the exception value marking excluded grid points.
    pub fn with_exc(mut self, value: fgr) -> Self {
        match &mut self {
            Self::Regular { exc, .. } | Self::Curvilinear { exc, .. } => *exc = Some(value),
        }
        self
    }

    /// Returns the exception value, if set.
    pub fn exc(&self) -> Option<fgr> {
        match self {
            Self::Regular { exc, .. } | Self::Curvilinear { exc, .. } => *exc,
        }
    }

    /// Returns the (rows, columns) shape of the vertex arrays.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Regular { grid, .. } => grid.base().shape(),
            Self::Curvilinear { grid, .. } => grid.shape(),
        }
    }

    pub fn grid_type(&self) -> &'static str {
        match self {
            Self::Regular { .. } => "REG",
            Self::Curvilinear { .. } => "CURV",
        }
    }

    /// Returns the grid description for an `INPGRID` command, locating an
    /// input field on this grid.
    ///
    /// The emitted mesh counts are `nx - 1` and `ny - 1`, following the
    /// SWAN input convention.
    pub fn inpgrid(&self) -> Result<String, ValidationError> {
        match self {
            Self::Regular { grid, exc } => {
                let mut command = format!(
                    "REG {} {} {} {} {} {} {}",
                    grid.x0(),
                    grid.y0(),
                    grid.rot(),
                    grid.nx() - 1,
                    grid.ny() - 1,
                    grid.dx(),
                    grid.dy()
                );
                if let Some(exc) = exc {
                    command.push_str(&format!(" EXC {}", exc));
                }
                Ok(command)
            }
            Self::Curvilinear { .. } => Err(ValidationError::UnsupportedGridType {
                grid_type: self.grid_type(),
                operation: "the INPGRID command",
            }),
        }
    }

    /// Returns the grid description for the `CGRID` command, defining the
    /// computational grid.
    pub fn cgrid(&self) -> Result<String, ValidationError> {
        match self {
            Self::Regular { grid, .. } => Ok(format!(
                "REG {} {} {} {} {} {} {}",
                grid.x0(),
                grid.y0(),
                grid.rot(),
                grid.dx() * grid.nx() as fgr,
                grid.dy() * grid.ny() as fgr,
                grid.nx() - 1,
                grid.ny() - 1
            )),
            Self::Curvilinear { .. } => Err(ValidationError::UnsupportedGridType {
                grid_type: self.grid_type(),
                operation: "the CGRID command",
            }),
        }
    }

    /// Returns the `READGRID` command accompanying `CGRID`, empty for
    /// regular grids.
    pub fn cgrid_read(&self) -> Result<String, ValidationError> {
        match self {
            Self::Regular { .. } => Ok(String::new()),
            Self::Curvilinear { .. } => Err(ValidationError::UnsupportedGridType {
                grid_type: self.grid_type(),
                operation: "the READGRID command",
            }),
        }
    }
}

impl Grid2 for SwanGrid {
    fn topology(&self) -> GridTopology {
        GridTopology::Structured
    }

    fn x(&self) -> &Array1<fgr> {
        match self {
            Self::Regular { grid, .. } => grid.x(),
            Self::Curvilinear { grid, .. } => grid.x(),
        }
    }

    fn y(&self) -> &Array1<fgr> {
        match self {
            Self::Regular { grid, .. } => grid.y(),
            Self::Curvilinear { grid, .. } => grid.y(),
        }
    }

    fn boundary_points(&self) -> Vec<Point2<fgr>> {
        match self {
            Self::Regular { grid, .. } => grid.boundary_points(),
            Self::Curvilinear { grid, .. } => grid.boundary_points(),
        }
    }
}

/// Expected kind of a settings value.
#[derive(Clone, Copy, Debug)]
enum SettingKind {
    Text,
    Number,
}

/// Settings keys the SWAN templates require, with their expected kinds.
const REQUIRED_SETTINGS: [(&str, SettingKind); 10] = [
    ("cgrid", SettingKind::Text),
    ("out_start", SettingKind::Text),
    ("out_intvl", SettingKind::Text),
    ("bottom_grid", SettingKind::Text),
    ("bottom_file", SettingKind::Text),
    ("wind_grid", SettingKind::Text),
    ("wind_read", SettingKind::Text),
    ("spectra_file", SettingKind::Text),
    ("friction", SettingKind::Text),
    ("friction_coeff", SettingKind::Number),
];

/// SWAN-specific model configuration.
///
/// Declares the settings schema the SWAN templates rely on and derives the
/// computational grid commands from an attached [`SwanGrid`].
#[derive(Clone, Debug, Default)]
pub struct SwanConfig {
    grid: Option<SwanGrid>,
}

impl SwanConfig {
    /// Creates a configuration without an attached computational grid;
    /// the settings must then provide the `cgrid` commands directly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the computational grid used to derive the `cgrid` and
    /// `cgrid_read` settings.
    pub fn with_grid(mut self, grid: SwanGrid) -> Self {
        self.grid = Some(grid);
        self
    }
}

impl SolverConfig for SwanConfig {
    fn model_name(&self) -> &'static str {
        "SWAN"
    }

    fn update_settings(&self, settings: &mut Settings) {
        if let Some(grid) = &self.grid {
            // A grid that cannot supply the commands is reported by validate.
            if let (Ok(cgrid), Ok(cgrid_read)) = (grid.cgrid(), grid.cgrid_read()) {
                settings.set("cgrid", cgrid);
                settings.set("cgrid_read", cgrid_read);
            }
        }
    }

    fn validate(&self, settings: &Settings) -> Result<(), ConfigValidationError> {
        let mut problems = Vec::new();

        if let Some(grid) = &self.grid {
            if let Err(err) = grid.cgrid() {
                problems.push(format!("attached grid cannot supply `cgrid`: {}", err));
            }
        }

        for (key, kind) in REQUIRED_SETTINGS {
            match (settings.get(key), kind) {
                (None, _) => problems.push(format!("missing required key `{}`", key)),
                (Some(Value::String(_)), SettingKind::Text) => {}
                (Some(Value::Number(_)), SettingKind::Number) => {}
                // Numeric values given as text are accepted if they parse.
                (Some(Value::String(text)), SettingKind::Number)
                    if text.parse::<fgr>().is_ok() => {}
                (Some(value), _) => problems.push(format!(
                    "key `{}` has invalid value {}",
                    key, value
                )),
            }
        }

        if let Some(Value::String(friction)) = settings.get("friction") {
            if !FRICTION_SCHEMES.contains(&friction.as_str()) {
                problems.push(format!(
                    "friction `{}` must be one of {}",
                    friction,
                    FRICTION_SCHEMES.join(", ")
                ));
            }
        }
        if let Some(coeff) = settings.get("friction_coeff").and_then(value_as_float) {
            if !(coeff > 0.0 && coeff <= 1.0) {
                problems.push(format!(
                    "friction_coeff {} must lie in (0, 1]",
                    coeff
                ));
            }
        }
        if let Some(Value::String(spec)) = settings.get("bottom_grid") {
            if let Err(err) = SwanGrid::from_spec(spec) {
                problems.push(format!("bottom_grid: {}", err));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigValidationError::new(problems))
        }
    }
}

fn value_as_float(value: &Value) -> Option<fgr> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn perth_grid() -> SwanGrid {
        SwanGrid::regular(115.68, -32.76, 77.0, 0.001, 0.001, 390, 150).unwrap()
    }

    #[test]
    fn inpgrid_command_counts_meshes_not_vertices() {
        let grid = perth_grid().with_exc(-99.0);
        assert_eq!(
            grid.inpgrid().unwrap(),
            "REG 115.68 -32.76 77 389 149 0.001 0.001 EXC -99"
        );
    }

    #[test]
    fn cgrid_command_spans_the_full_extent() {
        assert_eq!(
            perth_grid().cgrid().unwrap(),
            "REG 115.68 -32.76 77 0.39 0.15 389 149"
        );
        assert_eq!(perth_grid().cgrid_read().unwrap(), "");
    }

    #[test]
    fn cgrid_extent_matches_the_generated_span() {
        let grid = SwanGrid::regular(0.0, 0.0, 0.0, 0.001, 0.001, 390, 150).unwrap();
        assert_eq!(grid.cgrid().unwrap(), "REG 0 0 0 0.39 0.15 389 149");
        let bounds = grid.bbox(0.0);
        assert_eq!(bounds.max_x(), 0.39);
        assert_eq!(bounds.max_y(), 0.15);
    }

    #[test]
    fn grid_spec_string_round_trips() {
        let grid = SwanGrid::from_spec("REG 115.68 -32.76 77 390 150 0.001 0.001 EXC -99.0")
            .unwrap();
        match &grid {
            SwanGrid::Regular { grid, .. } => {
                assert_eq!(grid.nx(), 390);
                assert_eq!(grid.ny(), 150);
                assert_eq!(grid.rot(), 77.0);
            }
            other => panic!("Unexpected grid variant: {:?}", other),
        }
        assert_eq!(grid.exc(), Some(-99.0));

        assert!(matches!(
            SwanGrid::from_spec("CURV 10 10"),
            Err(ValidationError::MalformedGridSpec { .. })
        ));
        assert!(matches!(
            SwanGrid::from_spec("REG 0 0 0 10 10"),
            Err(ValidationError::MalformedGridSpec { .. })
        ));
    }

    fn complete_settings() -> Settings {
        let mut settings = Settings::new();
        settings.set("cgrid", "REG 115.68 -32.76 77 0.39 0.15 389 149");
        settings.set("out_start", "20200221.040000");
        settings.set("out_intvl", "1.0 HR");
        settings.set("bottom_grid", "REG 115.68 -32.76 77 390 150 0.001 0.001 EXC -99.0");
        settings.set("bottom_file", "bathy.bot");
        settings.set("wind_grid", "REG 115.3 -32.8 0.0 2 3 0.35 0.23");
        settings.set("wind_read", "SERIES 'extracted.wind' 1 FORMAT '(3F8.1)'");
        settings.set("spectra_file", "boundary.spec");
        settings.set("friction", "MAD");
        settings.set("friction_coeff", 0.1);
        settings
    }

    #[test]
    fn complete_settings_pass_validation() {
        assert!(SwanConfig::new().validate(&complete_settings()).is_ok());
    }

    #[test]
    fn all_problems_are_reported_in_one_batch() {
        let mut settings = complete_settings();
        settings.set("friction", "MUD");
        settings.set("friction_coeff", 1.5);
        settings.set("bottom_grid", "REG broken");
        let error = SwanConfig::new().validate(&settings).unwrap_err();
        assert_eq!(error.problems().len(), 3);
        let report = error.to_string();
        assert!(report.contains("friction `MUD`"));
        assert!(report.contains("friction_coeff 1.5"));
        assert!(report.contains("bottom_grid"));
    }

    #[test]
    fn missing_keys_are_all_named() {
        let error = SwanConfig::new().validate(&Settings::new()).unwrap_err();
        assert_eq!(error.problems().len(), REQUIRED_SETTINGS.len());
        assert!(error
            .to_string()
            .contains("missing required key `spectra_file`"));
    }

    #[test]
    fn attached_curvilinear_grid_is_reported_in_the_batch() {
        let base = BaseGrid::from_coords(
            ndarray::array![[0.0, 1.0], [0.0, 1.0]],
            ndarray::array![[0.0, 0.0], [1.0, 1.0]],
        )
        .unwrap();
        let grid = SwanGrid::Curvilinear {
            grid: base,
            gridfile: "swan.grd".to_string(),
            exc: None,
        };
        let error = SwanConfig::new()
            .with_grid(grid)
            .validate(&complete_settings())
            .unwrap_err();
        assert_eq!(error.problems().len(), 1);
        assert!(error.to_string().contains("CURV"));
    }

    #[test]
    fn attached_grid_supplies_the_cgrid_settings() {
        let mut settings = complete_settings();
        let config = SwanConfig::new().with_grid(perth_grid());
        config.update_settings(&mut settings);
        assert_eq!(
            settings.get("cgrid").unwrap().as_str().unwrap(),
            "REG 115.68 -32.76 77 0.39 0.15 389 149"
        );
        assert_eq!(settings.get("cgrid_read").unwrap().as_str().unwrap(), "");
    }
}
