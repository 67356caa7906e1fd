//! Extraction entry point.
//!
//! [`extract`] turns a resolved [`Target`] into rendered output. It never
//! prints or writes files; that stays in [`crate::cli`].

mod report;

pub use report::ScanReport;

use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result, ResultExt};
use crate::metadata::TagReader;
use crate::render::{self, Layout};
use crate::scanner::{self, ScanOptions};

/// What the user pointed us at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Directory(PathBuf),
}

impl Target {
    /// Classify `path`. A path that cannot be inspected is a scan failure.
    pub fn resolve(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path).map_err(|e| Error::scan(path, e))?;
        if meta.is_dir() {
            Ok(Self::Directory(path.to_path_buf()))
        } else {
            Ok(Self::File(path.to_path_buf()))
        }
    }
}

/// Rendering of a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One-line human-readable summary
    #[default]
    Text,
    /// The full record as a JSON object
    Json,
}

/// Everything [`extract`] needs besides the reader.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub scan: ScanOptions,
    pub layout: Layout,
    pub format: OutputFormat,
    pub missing: String,
    pub indent: usize,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            scan: ScanOptions::from(&config.scan),
            layout: config.output.layout,
            format: OutputFormat::default(),
            missing: config.output.missing.clone(),
            indent: config.output.indent,
        }
    }
}

/// Read tags for `target` and render them.
///
/// A single file that cannot be read is an error. A directory scan only
/// fails when its root cannot be traversed.
pub fn extract(target: &Target, reader: &dyn TagReader, settings: &Settings) -> Result<String> {
    match target {
        Target::File(path) => {
            let record = reader.read(path)?;
            match settings.format {
                OutputFormat::Text => Ok(render::summary(&record, &settings.missing)),
                OutputFormat::Json => render::record_json(&record, settings.indent),
            }
        }
        Target::Directory(root) => {
            let report = scanner::scan(root, reader, &settings.scan)?;
            info!(
                tracks = report.track_count(),
                failed = report.failed().len(),
                "Extracted tags from {}",
                root.display()
            );
            render::report_json(&report, settings.layout, settings.indent)
                .with_context("Rendering scan report")
        }
    }
}
