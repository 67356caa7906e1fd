//! Output rendering for single files and directory reports.
//!
//! # Layouts
//!
//! A [`ScanReport`] can be written two ways:
//! - [`Layout::Legacy`]: one object with artists at the top level and the
//!   failure list under [`FAILED_KEY`]
//! - [`Layout::Split`]: `{"tracks": {...}, "failed": [...]}`
//!
//! The legacy layout cannot tell an artist called `FAILED` apart from the
//! failure list. Rather than emit a duplicate key, rendering refuses with
//! [`Error::ReservedKey`] when both are present.

use serde::Deserialize;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::library::ScanReport;
use crate::model::TrackRecord;

/// Top-level key holding failed paths in the legacy layout.
pub const FAILED_KEY: &str = "FAILED";

/// Shape of the directory report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Artists and the failure list share one object
    #[default]
    Legacy,
    /// Tracks and failures in separate fields
    Split,
}

/// One-line summary of a single file.
///
/// Absent fields are replaced with `missing`.
pub fn summary(record: &TrackRecord, missing: &str) -> String {
    let or_missing = |field: &Option<String>| field.clone().unwrap_or_else(|| missing.to_string());
    let track = record
        .track_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| missing.to_string());

    format!(
        "'{}' by {} from album '{}' track #{}",
        or_missing(&record.title),
        or_missing(&record.artist),
        or_missing(&record.album),
        track
    )
}

/// A single record as a JSON object.
pub fn record_json(record: &TrackRecord, indent: usize) -> Result<String> {
    to_json(record, indent)
}

/// A directory report as JSON in the given layout.
pub fn report_json(report: &ScanReport, layout: Layout, indent: usize) -> Result<String> {
    match layout {
        Layout::Legacy => {
            if !report.failed().is_empty() && report.artists().contains_key(FAILED_KEY) {
                return Err(Error::ReservedKey {
                    key: FAILED_KEY.to_string(),
                });
            }
            to_json(&LegacyReport(report), indent)
        }
        Layout::Split => to_json(
            &SplitReport {
                tracks: report,
                failed: Failed(report.failed()),
            },
            indent,
        ),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| Error::Io(std::io::Error::other(e)))
}

struct LegacyReport<'a>(&'a ScanReport);

impl Serialize for LegacyReport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let report = self.0;
        let mut map = serializer.serialize_map(None)?;
        for (artist, albums) in report.artists() {
            map.serialize_entry(artist, albums)?;
        }
        if !report.failed().is_empty() {
            map.serialize_entry(FAILED_KEY, &Failed(report.failed()))?;
        }
        map.end()
    }
}

#[derive(serde::Serialize)]
struct SplitReport<'a> {
    #[serde(serialize_with = "artists_only")]
    tracks: &'a ScanReport,
    failed: Failed<'a>,
}

fn artists_only<S: Serializer>(
    report: &&ScanReport,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    report.artists().serialize(serializer)
}

/// Failed paths rendered lossily so non-UTF-8 names never abort output.
struct Failed<'a>(&'a [PathBuf]);

impl Serialize for Failed<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|p| p.display().to_string()))
    }
}
