//! Utilities for input/output.

use std::io::Read;
use std::{fs, io, path};

/// Reads and returns the content of the specified text file.
pub fn read_text_file(file_path: &path::Path) -> io::Result<String> {
    let file = fs::File::open(file_path)?;
    let mut text = String::new();
    let _ = io::BufReader::new(file).read_to_string(&mut text)?;
    Ok(text)
}

/// Writes the given text to a file at the given path, overwriting any
/// existing file.
pub fn write_text_file(file_path: &path::Path, text: &str) -> io::Result<()> {
    fs::write(file_path, text)
}

/// Whether the given directory exists and holds at least one entry.
pub fn dir_is_non_empty(dir_path: &path::Path) -> io::Result<bool> {
    if !dir_path.exists() {
        return Ok(false);
    }
    Ok(fs::read_dir(dir_path)?.next().is_some())
}
