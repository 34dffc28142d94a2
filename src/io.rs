//! File input/output.

pub mod utils;

/// Whether or not to print non-critical status messages.
#[derive(Clone, Copy, Debug)]
pub enum Verbose {
    Yes,
    No,
}

impl Verbose {
    pub fn is_yes(&self) -> bool {
        match self {
            Verbose::Yes => true,
            Verbose::No => false,
        }
    }
}

impl From<bool> for Verbose {
    fn from(is_yes: bool) -> Self {
        if is_yes {
            Verbose::Yes
        } else {
            Verbose::No
        }
    }
}
