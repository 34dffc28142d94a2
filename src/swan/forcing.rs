//! Writing of SWAN forcing input files.

use super::SwanGrid;
use crate::error::{Error, ValidationError};
use crate::geometry::Point2;
use crate::grid::fgr;
use crate::spectra::SpectralSites;
use chrono::NaiveDateTime;
use ndarray::Array2;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Time stamp format SWAN expects in input files.
pub const SWAN_TIME_FORMAT: &str = "%Y%m%d.%H%M%S";

/// A nonstationary forcing field (such as wind) sampled on a regular grid.
///
/// Holds one 2D field per time step for up to two components, matching the
/// layout SWAN's `READINP` command reads back.
#[derive(Clone, Debug)]
pub struct GriddedForcing {
    grid: SwanGrid,
    times: Vec<NaiveDateTime>,
    u: Vec<Array2<fgr>>,
    v: Option<Vec<Array2<fgr>>>,
}

impl GriddedForcing {
    /// Creates a forcing field from per-time 2D arrays of the first
    /// component, which must all match the grid shape.
    pub fn new(
        grid: SwanGrid,
        times: Vec<NaiveDateTime>,
        u: Vec<Array2<fgr>>,
    ) -> Result<Self, ValidationError> {
        if times.len() != u.len() {
            return Err(ValidationError::InconsistentSeriesLengths);
        }
        check_field_shapes(&u, grid.shape())?;
        Ok(Self {
            grid,
            times,
            u,
            v: None,
        })
    }

    /// Adds a second component (such as the meridional wind), written after
    /// the first component at every time step.
    pub fn with_second_component(
        mut self,
        v: Vec<Array2<fgr>>,
    ) -> Result<Self, ValidationError> {
        if v.len() != self.times.len() {
            return Err(ValidationError::InconsistentSeriesLengths);
        }
        check_field_shapes(&v, self.grid.shape())?;
        self.v = Some(v);
        Ok(self)
    }

    /// Writes the forcing to a SWAN nonstationary input file and returns the
    /// corresponding `INPGRID` and `READINP` command fragments.
    ///
    /// The file holds, per time step, a time stamp line followed by the
    /// field rows with two-decimal values. Fails before creating the file if
    /// there are no time steps.
    pub fn write_inpgrid(&self, output_file: &Path) -> Result<(String, String), Error> {
        if self.times.is_empty() {
            return Err(ValidationError::NoTimeSteps {
                path: output_file.to_path_buf(),
            }
            .into());
        }

        let mut content = String::new();
        for (index, time) in self.times.iter().enumerate() {
            let _ = writeln!(content, "{}", time.format(SWAN_TIME_FORMAT));
            write_field_rows(&mut content, &self.u[index]);
            if let Some(v) = &self.v {
                write_field_rows(&mut content, &v[index]);
            }
        }
        fs::write(output_file, content)?;

        let step_hours = if self.times.len() > 1 {
            let span = *self.times.last().expect("Non-empty") - self.times[0];
            span.num_seconds() as fgr / 3600.0 / (self.times.len() - 1) as fgr
        } else {
            0.0
        };
        let file_name = output_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let inpgrid_command = format!(
            "{} NONSTATION {} {} HR",
            self.grid.inpgrid()?,
            self.times[0].format(SWAN_TIME_FORMAT),
            step_hours
        );
        let readinp_command = format!("1 '{}' 3 0 1 0 FREE", file_name);
        Ok((inpgrid_command, readinp_command))
    }
}

fn check_field_shapes(
    fields: &[Array2<fgr>],
    expected: (usize, usize),
) -> Result<(), ValidationError> {
    for (index, field) in fields.iter().enumerate() {
        if field.dim() != expected {
            return Err(ValidationError::ForcingShapeMismatch {
                index,
                found: field.dim(),
                expected,
            });
        }
    }
    Ok(())
}

fn write_field_rows(content: &mut String, field: &Array2<fgr>) {
    for row in field.rows() {
        let mut separator = "";
        for value in row {
            let _ = write!(content, "{}{:.2}", separator, value);
            separator = " ";
        }
        content.push('\n');
    }
}

/// Writes parametric boundary forcing as a set of TPAR files sampled along
/// the given closed boundary ring, and returns the `BOUNDSPEC` command
/// referencing them.
///
/// The boundary is sampled every `interval` length units; each sample point
/// takes the wave parameter series of the nearest site within `interval`,
/// skipping sites without a complete series. Files are named `0.TPAR`,
/// `1.TPAR`, ... in sampling order.
pub fn write_tpar_boundary(
    dest_dir: &Path,
    boundary: &[Point2<fgr>],
    interval: fgr,
    sites: &SpectralSites,
    dir_spread: fgr,
) -> Result<String, Error> {
    if !(interval.is_finite() && interval > 0.0) {
        return Err(ValidationError::InvalidInterval(interval).into());
    }

    let mut bound_command = String::from("BOUNDSPEC SEGM XY ");
    for point in boundary {
        let _ = write!(bound_command, "&\n {:.8} {:.8} ", point.x, point.y);
    }
    bound_command.push_str("&\n VAR FILE ");

    let total_length: fgr = boundary
        .windows(2)
        .map(|segment| segment[0].distance_to(&segment[1]))
        .sum();
    let sample_count = (total_length / interval) as usize;

    let mut file_index = 0;
    for sample in 1..sample_count {
        let fraction = sample as fgr / (sample_count - 1) as fgr;
        let sample_point = point_at_fraction(boundary, fraction, total_length);

        let nearest = sites
            .iter()
            .filter(|site| {
                site.series()
                    .map_or(false, |series| !series.is_empty() && !series.has_gaps())
            })
            .map(|site| (site, site.location().distance_to(&sample_point)))
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).expect("Finite distances"));

        if let Some((site, distance)) = nearest {
            if distance <= interval {
                let series = site.series().expect("Filtered on presence above");
                let mut content = String::from("TPAR\n");
                for (time, hs, tp, dp) in series.iter() {
                    let _ = writeln!(
                        content,
                        "{} {:.2} {:.2} {:.1} {:.2}",
                        time.format(SWAN_TIME_FORMAT),
                        hs,
                        tp,
                        dp,
                        dir_spread
                    );
                }
                let file_name = format!("{}.TPAR", file_index);
                fs::write(dest_dir.join(&file_name), content)?;
                let _ = write!(
                    bound_command,
                    "&\n {:.8} '{}' 1 ",
                    fraction * total_length,
                    file_name
                );
                file_index += 1;
            }
        }
    }

    Ok(bound_command)
}

/// Returns the point at the given fraction of the total arc length along
/// the boundary ring.
fn point_at_fraction(boundary: &[Point2<fgr>], fraction: fgr, total_length: fgr) -> Point2<fgr> {
    let mut remaining = fraction.clamp(0.0, 1.0) * total_length;
    for segment in boundary.windows(2) {
        let length = segment[0].distance_to(&segment[1]);
        if remaining <= length && length > 0.0 {
            let t = remaining / length;
            return Point2::new(
                segment[0].x + t * (segment[1].x - segment[0].x),
                segment[0].y + t * (segment[1].y - segment[0].y),
            );
        }
        remaining = remaining - length;
    }
    *boundary.last().expect("Non-empty boundary ring")
}
