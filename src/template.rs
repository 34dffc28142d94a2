//! Settings mappings and rendering of template directory trees.

use crate::error::TemplateRenderError;
use crate::io::{utils, Verbose};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str,
};

lazy_static! {
    /// Matches a `{{key}}` placeholder token, tolerating whitespace inside
    /// the braces.
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap();
}

/// Ordered mapping from placeholder names to settings values.
///
/// Values are arbitrary JSON values; they are stringified when substituted
/// into a template. The ordering is fixed so that identical settings always
/// render identically.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings(BTreeMap<String, Value>);

impl Settings {
    /// Creates an empty settings mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for the given key.
    pub fn set<S: Into<String>, V: Into<Value>>(&mut self, key: S, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for the given key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes the value registered under the given key, if any.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Loads a settings mapping from a JSON object file.
    pub fn from_json_file(file_path: &Path) -> Result<Self, TemplateRenderError> {
        let text = utils::read_text_file(file_path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Saves the settings mapping as pretty-printed JSON.
    pub fn save_json_file(&self, file_path: &Path) -> Result<(), TemplateRenderError> {
        let text = serde_json::to_string_pretty(self)?;
        utils::write_text_file(file_path, &text)?;
        Ok(())
    }

    /// Substitutes every placeholder in the given text with the stringified
    /// settings value, failing on placeholders with no matching key.
    ///
    /// `origin` names the template file (or file name) the text came from,
    /// for error reporting.
    pub fn substitute(&self, text: &str, origin: &Path) -> Result<String, TemplateRenderError> {
        let mut output = String::with_capacity(text.len());
        let mut last_end = 0;
        for captures in PLACEHOLDER_REGEX.captures_iter(text) {
            let token = captures.get(0).expect("Capture group 0 always present");
            let name = &captures[1];
            match self.get(name) {
                Some(value) => {
                    output.push_str(&text[last_end..token.start()]);
                    output.push_str(&stringify(value));
                    last_end = token.end();
                }
                None => {
                    return Err(TemplateRenderError::UnresolvedPlaceholder {
                        name: name.to_string(),
                        path: origin.to_path_buf(),
                    })
                }
            }
        }
        output.push_str(&text[last_end..]);
        Ok(output)
    }
}

/// Converts a settings value to its template substitution text.
///
/// Strings are inserted without quotes; composite values keep their compact
/// JSON form.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Renders a template directory tree into an output directory, substituting
/// placeholders in file contents, file names and directory names.
#[derive(Clone, Debug)]
pub struct TemplateRenderer<'a> {
    settings: &'a Settings,
    overwrite: bool,
    verbose: Verbose,
}

impl<'a> TemplateRenderer<'a> {
    /// Creates a renderer for the given settings, refusing to overwrite by
    /// default.
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            overwrite: false,
            verbose: Verbose::No,
        }
    }

    /// Whether rendering into a non-empty output directory is allowed.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Whether to print a status message for every file written.
    pub fn with_verbose(mut self, verbose: Verbose) -> Self {
        self.verbose = verbose;
        self
    }

    /// Renders the template tree rooted at `template_dir` into `output_dir`.
    ///
    /// Rendering is a single deterministic pass; on failure the partially
    /// written output is left as-is and must be treated as undefined.
    pub fn render(
        &self,
        template_dir: &Path,
        output_dir: &Path,
    ) -> Result<(), TemplateRenderError> {
        if !template_dir.is_dir() {
            return Err(TemplateRenderError::MissingTemplateDir(
                template_dir.to_path_buf(),
            ));
        }
        if !self.overwrite && utils::dir_is_non_empty(output_dir)? {
            return Err(TemplateRenderError::OutputDirNotEmpty(
                output_dir.to_path_buf(),
            ));
        }
        fs::create_dir_all(output_dir)?;
        self.render_dir_contents(template_dir, output_dir)
    }

    fn render_dir_contents(&self, src: &Path, dst: &Path) -> Result<(), TemplateRenderError> {
        // Sort entries by name so the render order (and any failure point)
        // does not depend on directory iteration order.
        let mut entries: Vec<_> =
            fs::read_dir(src)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let src_path = entry.path();
            let file_name = entry.file_name();
            let rendered_name = match file_name.to_str() {
                Some(name) => self.settings.substitute(name, &src_path)?,
                None => {
                    // Non-UTF-8 names cannot hold placeholders.
                    file_name.to_string_lossy().into_owned()
                }
            };
            let dst_path = dst.join(&rendered_name);

            if entry.file_type()?.is_dir() {
                fs::create_dir_all(&dst_path)?;
                self.render_dir_contents(&src_path, &dst_path)?;
            } else {
                self.render_file(&src_path, &dst_path)?;
            }
        }
        Ok(())
    }

    fn render_file(&self, src_path: &Path, dst_path: &Path) -> Result<(), TemplateRenderError> {
        let bytes = fs::read(src_path)?;
        match str::from_utf8(&bytes) {
            Ok(text) => {
                let rendered = self.settings.substitute(text, src_path)?;
                fs::write(dst_path, rendered)?;
            }
            // Binary files are copied verbatim.
            Err(_) => fs::write(dst_path, &bytes)?,
        }
        if self.verbose.is_yes() {
            println!("Wrote {}", dst_path.display());
        }
        Ok(())
    }
}
