//! Function for building the command line hierarchy.

use super::{generate::create_generate_subcommand, grid::create_grid_subcommand};
use clap::{self, Arg, ArgAction, Command};

/// Build the `swanprep` command line hierarchy.
pub fn build() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .action(ArgAction::SetTrue)
                .help("Display elapsed time when done"),
        )
        .subcommand(create_generate_subcommand())
        .subcommand(create_grid_subcommand())
}
