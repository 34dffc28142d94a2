//! Command line interface for inspecting SWAN grids.

use super::utils;
use crate::exit_on_error;
use crate::grid::{fgr, Grid2};
use crate::io::utils::write_text_file;
use crate::swan::SwanGrid;
use crate::{exit_on_false, exit_with_error};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Creates a subcommand for inspecting a SWAN grid specification.
pub fn create_grid_subcommand() -> Command {
    Command::new("grid")
        .about("Inspect a SWAN grid and print its command strings")
        .arg(
            Arg::new("grid-spec")
                .value_name("GRID_SPEC")
                .help("SWAN grid specification, such as `REG 115.68 -32.76 77 390 150 0.001 0.001`")
                .required(true),
        )
        .arg(
            Arg::new("buffer")
                .short('b')
                .long("buffer")
                .value_name("BUFFER")
                .help("Buffer to expand the reported bounding box by on all sides")
                .default_value("0.0"),
        )
        .arg(
            Arg::new("output-file")
                .short('o')
                .long("output-file")
                .value_name("OUTPUT_FILE")
                .help("Write the boundary ring vertices to this file"),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .action(ArgAction::SetTrue)
                .help("Automatically overwrite any existing file"),
        )
}

/// Runs the actions for the `grid` subcommand using the given arguments.
pub fn run_grid_subcommand(arguments: &ArgMatches) {
    let grid_spec = arguments
        .get_one::<String>("grid-spec")
        .expect("No value for required argument");
    let buffer: fgr = utils::get_value_from_required_parseable_argument(arguments, "buffer");
    exit_on_false!(
        buffer.is_finite() && buffer >= 0.0,
        "Error: buffer must be finite and non-negative"
    );

    let grid = exit_on_error!(
        SwanGrid::from_spec(grid_spec),
        "Error: Could not parse grid specification: {}"
    );

    let (rows, cols) = grid.shape();
    let bbox = grid.bbox(buffer);
    println!("Grid type: {}", grid.grid_type());
    println!("Vertices:  {} ({} rows x {} columns)", grid.vertex_count(), rows, cols);
    println!(
        "Bounding box: x in [{}, {}], y in [{}, {}]",
        bbox.min_x(),
        bbox.min_y(),
        bbox.max_x(),
        bbox.max_y()
    );
    println!(
        "CGRID:   {}",
        exit_on_error!(grid.cgrid(), "Error: Could not derive CGRID command: {}")
    );
    println!(
        "INPGRID: {}",
        exit_on_error!(grid.inpgrid(), "Error: Could not derive INPGRID command: {}")
    );

    if let Some(output_file) = arguments.get_one::<String>("output-file") {
        write_boundary_file(&grid, output_file, arguments.get_flag("overwrite"));
    }
}

fn write_boundary_file(grid: &SwanGrid, output_file: &str, automatic_overwrite: bool) {
    let output_file_path = PathBuf::from(output_file);
    if output_file_path.exists() && !automatic_overwrite {
        exit_with_error!(
            "Error: Output file {} already exists (use --overwrite to replace it)",
            output_file_path.display()
        );
    }
    let mut content = String::new();
    for point in grid.boundary() {
        let _ = writeln!(content, "{:.8} {:.8}", point.x, point.y);
    }
    exit_on_error!(
        write_text_file(&output_file_path, &content),
        "Error: Could not write boundary file: {}"
    );
    println!("Wrote boundary ring to {}", output_file_path.display());
}
