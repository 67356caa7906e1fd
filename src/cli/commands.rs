//! CLI argument definitions and the command handler.
//!
//! The handler returns an `anyhow::Result<()>`; output is written only once
//! extraction has fully succeeded, so a failed run leaves no output file.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{self, Config};
use crate::error::ResultExt;
use crate::library::{self, OutputFormat, Settings, Target};
use crate::metadata::LoftyReader;
use crate::render::Layout;

/// Extract artist, album, title and track number tags from audio files.
///
/// Given a file, prints a one-line summary. Given a directory, scans it
/// recursively and emits a JSON map of artist -> album -> track.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Audio file or directory to read
    #[arg(short, long)]
    pub path: PathBuf,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Single-file output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Directory report layout (overrides config)
    #[arg(long, value_enum)]
    pub layout: Option<Layout>,

    /// Read tags on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Extensions whose failures are reported, comma separated (overrides config)
    #[arg(long = "track-ext", value_delimiter = ',')]
    pub track_extensions: Vec<String>,

    /// Config file (defaults to the OS config directory)
    #[arg(long, env = "SONG_INFO_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Fold command-line overrides into the loaded config.
    fn apply_to(&self, config: &mut Config) {
        if let Some(layout) = self.layout {
            config.output.layout = layout;
        }
        if self.parallel {
            config.scan.parallel = true;
        }
        if !self.track_extensions.is_empty() {
            config.scan.tracked_extensions = self.track_extensions.clone();
        }
    }
}

/// Run the extraction described by `cli`.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };
    cli.apply_to(&mut config);
    debug!(?config, "Effective configuration");

    let settings = Settings {
        format: cli.format,
        ..Settings::from(&config)
    };
    let reader = LoftyReader::new(config.tags.artist_source);

    let target = Target::resolve(&cli.path)?;
    let output = library::extract(&target, &reader, &settings)
        .with_context(format!("Failed to extract tags from {}", cli.path.display()))?;

    match &cli.output {
        Some(path) => write_output(path, &output)?,
        None => println!("{output}"),
    }
    Ok(())
}

fn write_output(path: &Path, output: &str) -> anyhow::Result<()> {
    std::fs::write(path, output).with_context(format!("Writing {}", path.display()))?;
    info!("Wrote output to {}", path.display());
    Ok(())
}
