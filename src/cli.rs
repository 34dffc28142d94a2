//! Command line interface.

pub mod build;
pub mod generate;
pub mod grid;
pub mod run;
pub mod utils;
