//! Command-line interface for song-info.
//!
//! Parses arguments, loads configuration, runs the extraction and writes
//! the result to stdout or a file.

mod commands;

pub use commands::{Cli, run_command};
