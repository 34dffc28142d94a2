//! Model run wrappers staging solver configurations from templates.

use crate::error::{ConfigValidationError, Result};
use crate::io::Verbose;
use crate::template::{Settings, TemplateRenderer};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// Name of the settings snapshot written into every staged run.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Solver-specific hooks invoked while staging a model run.
///
/// Implementations supply the conventions of one external solver: which
/// settings keys the templates require, and which derived values to insert
/// before rendering.
pub trait SolverConfig {
    /// Name of the wrapped solver.
    fn model_name(&self) -> &'static str;

    /// Checks the settings against the solver's requirements, reporting all
    /// problems in a single batch.
    fn validate(&self, settings: &Settings) -> std::result::Result<(), ConfigValidationError>;

    /// Inserts solver-derived values into the settings before rendering.
    fn update_settings(&self, _settings: &mut Settings) {}
}

/// Configuration for templates with no solver-specific conventions.
///
/// Performs no validation beyond what rendering itself enforces.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericConfig;

impl SolverConfig for GenericConfig {
    fn model_name(&self) -> &'static str {
        "GENERIC"
    }

    fn validate(&self, _settings: &Settings) -> std::result::Result<(), ConfigValidationError> {
        Ok(())
    }
}

/// A single staged run of an external model.
///
/// Holds the settings mapping and a reference to the template directory, and
/// renders them into `output_dir/run_id` for the solver to consume.
#[derive(Clone, Debug)]
pub struct ModelRun<C> {
    run_id: String,
    output_dir: PathBuf,
    template: PathBuf,
    settings: Settings,
    config: C,
    overwrite: bool,
    verbose: Verbose,
}

impl<C: SolverConfig> ModelRun<C> {
    /// Creates a run wrapper for the given template and settings.
    pub fn new<S: Into<String>, P: Into<PathBuf>, Q: Into<PathBuf>>(
        run_id: S,
        output_dir: P,
        template: Q,
        settings: Settings,
        config: C,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            output_dir: output_dir.into(),
            template: template.into(),
            settings,
            config,
            overwrite: false,
            verbose: Verbose::No,
        }
    }

    /// Whether generating into a non-empty staging directory is allowed.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Whether to print status messages while generating.
    pub fn with_verbose(mut self, verbose: Verbose) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the run identifier.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Returns the settings the run was created with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the directory the run is staged into.
    pub fn staging_dir(&self) -> PathBuf {
        self.output_dir.join(&self.run_id)
    }

    /// Stages the run: stamps run metadata into a copy of the settings,
    /// validates them against the solver configuration, renders the template
    /// into the staging directory and writes a `settings.json` snapshot.
    ///
    /// Returns the staging directory path. Any failure aborts the whole
    /// generation; partially written output must be treated as undefined.
    pub fn generate(&self) -> Result<PathBuf> {
        let mut settings = self.settings.clone();
        settings.set("run_id", self.run_id.as_str());
        settings.set("model", self.config.model_name());
        settings.set(
            "_generated_at",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        settings.set("_generated_on", host_name());
        settings.set("_generated_by", user_name());
        self.config.update_settings(&mut settings);
        self.config.validate(&settings)?;

        let staging_dir = self.staging_dir();
        TemplateRenderer::new(&settings)
            .with_overwrite(self.overwrite)
            .with_verbose(self.verbose)
            .render(&self.template, &staging_dir)?;
        settings.save_json_file(&staging_dir.join(SETTINGS_FILE_NAME))?;

        if self.verbose.is_yes() {
            println!(
                "Staged {} run {} in {}",
                self.config.model_name(),
                self.run_id,
                staging_dir.display()
            );
        }
        Ok(staging_dir)
    }

    /// Archives the staging directory into `<staging_dir>.zip`, replacing
    /// any previous archive, and returns the archive path.
    ///
    /// Entries are stored relative to the staging directory, so unpacking
    /// the archive reproduces the staged tree.
    pub fn zip(&self) -> Result<PathBuf> {
        let staging_dir = self.staging_dir();
        let mut archive_name = staging_dir.clone().into_os_string();
        archive_name.push(".zip");
        let archive_path = PathBuf::from(archive_name);
        if archive_path.exists() {
            fs::remove_file(&archive_path)?;
        }

        let mut writer = ZipWriter::new(fs::File::create(&archive_path)?);
        archive_dir_contents(&mut writer, &staging_dir, &staging_dir)?;
        writer.finish().map_err(io::Error::from)?;

        if self.verbose.is_yes() {
            println!("Archived run {} in {}", self.run_id, archive_path.display());
        }
        Ok(archive_path)
    }
}

fn archive_dir_contents(
    writer: &mut ZipWriter<fs::File>,
    root: &Path,
    dir: &Path,
) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            archive_dir_contents(writer, root, &path)?;
        } else {
            let name = path
                .strip_prefix(root)
                .expect("Entries lie under the staging directory")
                .to_string_lossy()
                .replace('\\', "/");
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            writer.start_file(name, options).map_err(io::Error::from)?;
            io::copy(&mut fs::File::open(&path)?, writer)?;
        }
    }
    Ok(())
}

/// Loads a settings snapshot saved by a previous [`ModelRun::generate`].
pub fn load_settings(staging_dir: &Path) -> Result<Settings> {
    Ok(Settings::from_json_file(
        &staging_dir.join(SETTINGS_FILE_NAME),
    )?)
}

fn host_name() -> String {
    sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string())
}

fn user_name() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
