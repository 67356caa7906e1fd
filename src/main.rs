//! Song Info - extract music tags from audio files.
//!
//! Reads artist, album, title and track number from a single file, or from
//! every file under a directory, and renders them as a summary line or a
//! nested JSON report.

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod metadata;
pub mod model;
pub mod render;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr; stdout carries only the rendered output
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("song_info=info".parse()?))
        .init();

    cli::run_command(&args)
}
