//! The `swanprep` crate provides tools for configuring and staging runs of
//! the SWAN spectral wave model.

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod model;
pub mod num;
pub mod spectra;
pub mod swan;
pub mod template;

#[cfg(feature = "cli")]
pub mod cli;
