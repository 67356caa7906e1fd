//! Core data models for extracted tag data.
//!
//! Defines [`TrackRecord`] (one successfully read file) and the leaf types
//! of the aggregated report: [`TrackKey`] and [`TrackEntry`].
//!
//! # Serialization
//!
//! The report is rendered as nested JSON objects, so [`TrackKey`] must be
//! usable as an object key:
//! - `Number(n)` serializes as the decimal string `"n"`
//! - `Missing` serializes as `"null"`
//!
//! [`TrackEntry`] serializes as a two-element array `[title, path]`.

use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::path::PathBuf;

/// Tag data read from one audio file.
///
/// Every tag field is optional: files routinely lack some of them and
/// nothing here fills in defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TrackRecord {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub track_number: Option<u32>,
    /// Path the record was read from
    pub source_path: PathBuf,
}

impl TrackRecord {
    /// Key this record occupies within its album.
    pub fn track_key(&self) -> TrackKey {
        TrackKey::from(self.track_number)
    }

    /// Leaf value stored in the report.
    pub fn entry(&self) -> TrackEntry {
        TrackEntry {
            title: self.title.clone(),
            source_path: self.source_path.clone(),
        }
    }
}

/// Position of a track within an album.
///
/// Ordered with `Missing` before any number, then numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackKey {
    Missing,
    Number(u32),
}

impl From<Option<u32>> for TrackKey {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

impl Serialize for TrackKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.collect_str(n),
            Self::Missing => serializer.serialize_str("null"),
        }
    }
}

/// Leaf of the report: the title and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub title: Option<String>,
    pub source_path: PathBuf,
}

impl Serialize for TrackEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.title)?;
        tuple.serialize_element(&self.source_path.display().to_string())?;
        tuple.end()
    }
}
