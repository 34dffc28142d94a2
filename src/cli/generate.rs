//! Command line interface for staging model runs.

use crate::exit_on_error;
use crate::io::Verbose;
use crate::model::{GenericConfig, ModelRun, SolverConfig};
use crate::swan::{SwanConfig, SwanGrid};
use crate::template::Settings;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Creates a subcommand for staging a model run from a template directory.
pub fn create_generate_subcommand() -> Command {
    Command::new("generate")
        .about("Stage a model run by rendering a template directory")
        .arg(
            Arg::new("template")
                .value_name("TEMPLATE_DIR")
                .help("Path to the template directory to render")
                .required(true),
        )
        .arg(
            Arg::new("settings-file")
                .value_name("SETTINGS_FILE")
                .help("Path to the JSON file with the model settings")
                .required(true),
        )
        .arg(
            Arg::new("run-id")
                .short('r')
                .long("run-id")
                .value_name("ID")
                .help("Identifier for the run, used as the staging directory name")
                .default_value("run_0001"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory the staging directory is created under")
                .default_value("simulations"),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .value_name("MODEL")
                .help("Solver the settings are validated against")
                .value_parser(["swan", "generic"])
                .default_value("swan"),
        )
        .arg(
            Arg::new("grid")
                .long("grid")
                .value_name("GRID_SPEC")
                .help("SWAN grid specification used to derive the CGRID commands"),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .action(ArgAction::SetTrue)
                .help("Automatically overwrite an existing staging directory"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print status messages while generating"),
        )
}

/// Runs the actions for the `generate` subcommand using the given arguments.
pub fn run_generate_subcommand(arguments: &ArgMatches) {
    let template = PathBuf::from(
        arguments
            .get_one::<String>("template")
            .expect("No value for required argument"),
    );
    let settings_file = PathBuf::from(
        arguments
            .get_one::<String>("settings-file")
            .expect("No value for required argument"),
    );
    let run_id = arguments
        .get_one::<String>("run-id")
        .expect("No value for argument with default");
    let output_dir = arguments
        .get_one::<String>("output-dir")
        .expect("No value for argument with default");

    let settings = exit_on_error!(
        Settings::from_json_file(&settings_file),
        "Error: Could not read settings file: {}"
    );

    match arguments
        .get_one::<String>("model")
        .expect("No value for argument with default")
        .as_str()
    {
        "swan" => {
            let mut config = SwanConfig::new();
            if let Some(grid_spec) = arguments.get_one::<String>("grid") {
                let grid = exit_on_error!(
                    SwanGrid::from_spec(grid_spec),
                    "Error: Could not parse grid specification: {}"
                );
                config = config.with_grid(grid);
            }
            stage_run(arguments, run_id, output_dir, template, settings, config);
        }
        "generic" => {
            stage_run(
                arguments,
                run_id,
                output_dir,
                template,
                settings,
                GenericConfig,
            );
        }
        invalid => unreachable!("Invalid model: {}", invalid),
    }
}

fn stage_run<C: SolverConfig>(
    arguments: &ArgMatches,
    run_id: &str,
    output_dir: &str,
    template: PathBuf,
    settings: Settings,
    config: C,
) {
    let verbose: Verbose = arguments.get_flag("verbose").into();
    let run = ModelRun::new(run_id, output_dir, template, settings, config)
        .with_overwrite(arguments.get_flag("overwrite"))
        .with_verbose(verbose);

    let staging_dir = exit_on_error!(run.generate(), "Error: Could not stage model run: {}");
    println!("Staged run in {}", staging_dir.display());
}
