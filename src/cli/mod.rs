//! Command-line interface for docmeta.

mod commands;
pub mod icons;

pub use commands::{is_verbose, run};
