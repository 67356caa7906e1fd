//! Recursive directory scanning.
//!
//! Every regular file under the root is handed to a [`TagReader`], whatever
//! its extension. Successful reads go into the [`ScanReport`]. A failed read
//! is recorded only when the file carries a tracked extension; for anything
//! else a failure is the expected outcome and is dropped.
//!
//! Traversal is depth-first with entries sorted by file name, so two scans
//! of an unchanged tree visit files in the same order.

use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::library::ScanReport;
use crate::metadata::TagReader;
use crate::model::TrackRecord;

/// Extensions whose read failures are reported.
///
/// Stored without the leading dot and lower-cased; matching is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedExtensions(Vec<String>);

impl TrackedExtensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exts: Vec<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        exts.sort();
        exts.dedup();
        Self(exts)
    }

    /// Whether the file name ends in `.{ext}` for a tracked extension.
    ///
    /// Works on the whole name, so a bare `.mp3` counts too.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|s| s.to_str())
            .map(|name| {
                let name = name.to_ascii_lowercase();
                self.0.iter().any(|e| {
                    name.strip_suffix(e.as_str())
                        .is_some_and(|stem| stem.ends_with('.'))
                })
            })
            .unwrap_or(false)
    }
}

impl Default for TrackedExtensions {
    fn default() -> Self {
        Self::new(["mp3"])
    }
}

/// How a directory is walked.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub tracked: TrackedExtensions,
    pub follow_links: bool,
    /// Read tags on the rayon pool instead of the calling thread
    pub parallel: bool,
}

impl From<&ScanConfig> for ScanOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            tracked: TrackedExtensions::new(&config.tracked_extensions),
            follow_links: config.follow_links,
            parallel: config.parallel,
        }
    }
}

/// Scans `root` recursively and aggregates the tags of every file found.
///
/// Per-file failures never abort the scan. Fails with [`Error::Scan`] only
/// when the root itself is missing, not a directory, or unreadable.
pub fn scan(root: &Path, reader: &dyn TagReader, options: &ScanOptions) -> Result<ScanReport> {
    let files = collect_files(root, options.follow_links)?;
    info!(root = %root.display(), files = files.len(), "Scanning directory");

    let mut report = ScanReport::new();
    if options.parallel {
        // Reads fan out; results come back in traversal order and are
        // folded here, so this thread stays the only writer.
        let outcomes: Vec<(PathBuf, Result<TrackRecord>)> = files
            .into_par_iter()
            .map(|path| {
                let outcome = reader.read(&path);
                (path, outcome)
            })
            .collect();
        for (path, outcome) in outcomes {
            fold(&mut report, path, outcome, &options.tracked);
        }
    } else {
        for path in files {
            let outcome = reader.read(&path);
            fold(&mut report, path, outcome, &options.tracked);
        }
    }

    debug!(
        tracks = report.track_count(),
        failed = report.failed().len(),
        "Scan complete"
    );
    Ok(report)
}

fn fold(
    report: &mut ScanReport,
    path: PathBuf,
    outcome: Result<TrackRecord>,
    tracked: &TrackedExtensions,
) {
    match outcome {
        Ok(record) => {
            if let Some(previous) = report.insert(record) {
                debug!(
                    replaced = %previous.source_path.display(),
                    by = %path.display(),
                    "Duplicate track slot"
                );
            }
        }
        Err(e) if tracked.matches(&path) => {
            warn!(path = %path.display(), error = %e, "Failed to read tags");
            report.record_failure(path);
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping untracked file");
        }
    }
}

/// Lists every regular file below `root` in traversal order.
fn collect_files(root: &Path, follow_links: bool) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(root).map_err(|e| Error::scan(root, e))?;
    if !meta.is_dir() {
        return Err(Error::scan(
            root,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) if is_regular_file(&entry) => files.push(entry.into_path()),
            Ok(_) => {}
            // The root itself could not be listed
            Err(e) if e.depth() == 0 => return Err(Error::scan(root, io::Error::from(e))),
            Err(e) => {
                warn!(path = ?e.path(), error = %e, "Skipping unreadable entry");
            }
        }
    }
    Ok(files)
}

/// A regular file, or a symlink to one even when links are not followed.
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        || (entry.path_is_symlink()
            && std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file()))
}
