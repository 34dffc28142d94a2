//! Function for running the command line program.

use super::{build, generate::run_generate_subcommand, grid::run_grid_subcommand};
use std::time::Instant;

/// Runs the `swanprep` command line program.
pub fn run() {
    let command = build::build();

    let arguments = command.get_matches();

    let start_instant = Instant::now();

    if let Some(generate_arguments) = arguments.subcommand_matches("generate") {
        run_generate_subcommand(generate_arguments);
    }
    if let Some(grid_arguments) = arguments.subcommand_matches("grid") {
        run_grid_subcommand(grid_arguments);
    }

    if arguments.get_flag("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
