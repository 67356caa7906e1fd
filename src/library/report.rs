//! Aggregated result of a directory scan.
//!
//! Successful reads are folded into a nested `artist -> album -> track`
//! mapping; failed paths go to a separate ordered list. Keeping the two apart
//! means no artist name can ever be mistaken for the failure list. The legacy
//! single-object output that merges them is produced by [`crate::render`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::model::{TrackEntry, TrackKey, TrackRecord};

/// Tracks of one album keyed by track number.
pub type AlbumTracks = BTreeMap<TrackKey, TrackEntry>;

/// Albums of one artist keyed by album name.
pub type ArtistAlbums = BTreeMap<String, AlbumTracks>;

/// Everything a directory scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    artists: BTreeMap<String, ArtistAlbums>,
    failed: Vec<PathBuf>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under `artist -> album -> track`.
    ///
    /// Missing intermediate levels are created. An absent artist or album is
    /// keyed by the empty string. A record landing on an occupied slot
    /// replaces it and the previous entry is returned.
    pub fn insert(&mut self, record: TrackRecord) -> Option<TrackEntry> {
        let key = record.track_key();
        let TrackRecord {
            artist,
            album,
            title,
            source_path,
            ..
        } = record;

        self.artists
            .entry(artist.unwrap_or_default())
            .or_default()
            .entry(album.unwrap_or_default())
            .or_default()
            .insert(key, TrackEntry { title, source_path })
    }

    /// Append a path that failed to read.
    pub fn record_failure(&mut self, path: impl Into<PathBuf>) {
        self.failed.push(path.into());
    }

    pub fn artists(&self) -> &BTreeMap<String, ArtistAlbums> {
        &self.artists
    }

    /// Failed paths in the order they were recorded.
    pub fn failed(&self) -> &[PathBuf] {
        &self.failed
    }

    pub fn get(&self, artist: &str, album: &str, key: TrackKey) -> Option<&TrackEntry> {
        self.artists.get(artist)?.get(album)?.get(&key)
    }

    pub fn track_count(&self) -> usize {
        self.artists
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;

    #[test]
    fn test_insert_creates_nested_levels() {
        let mut report = ScanReport::new();
        let replaced = report.insert(record("X", "Y", "T1", Some(1), "/m/song1.mp3"));

        assert!(replaced.is_none());
        let entry = report.get("X", "Y", TrackKey::Number(1)).unwrap();
        assert_eq!(entry.title.as_deref(), Some("T1"));
        assert_eq!(entry.source_path, PathBuf::from("/m/song1.mp3"));
        assert_eq!(report.track_count(), 1);
        assert!(report.failed().is_empty());
    }

    #[test]
    fn test_duplicate_slot_last_write_wins() {
        let mut report = ScanReport::new();
        report.insert(record("X", "Y", "First", Some(1), "/m/a.mp3"));
        let replaced = report.insert(record("X", "Y", "Second", Some(1), "/m/b.mp3"));

        assert_eq!(replaced.unwrap().title.as_deref(), Some("First"));
        let entry = report.get("X", "Y", TrackKey::Number(1)).unwrap();
        assert_eq!(entry.title.as_deref(), Some("Second"));
        assert_eq!(entry.source_path, PathBuf::from("/m/b.mp3"));
        assert_eq!(report.track_count(), 1);
    }

    #[test]
    fn test_absent_fields_use_empty_and_missing_keys() {
        let mut report = ScanReport::new();
        report.insert(TrackRecord {
            artist: None,
            album: None,
            title: None,
            track_number: None,
            source_path: PathBuf::from("/m/untagged.mp3"),
        });

        let entry = report.get("", "", TrackKey::Missing).unwrap();
        assert_eq!(entry.title, None);
    }

    #[test]
    fn test_same_track_number_on_different_albums_coexists() {
        let mut report = ScanReport::new();
        report.insert(record("X", "Y", "A", Some(1), "/m/a.mp3"));
        report.insert(record("X", "Z", "B", Some(1), "/m/b.mp3"));
        assert_eq!(report.track_count(), 2);
        assert_eq!(report.artists()["X"].len(), 2);
    }

    #[test]
    fn test_record_failure_keeps_order() {
        let mut report = ScanReport::new();
        report.record_failure("/m/b.mp3");
        report.record_failure("/m/a.mp3");
        assert_eq!(
            report.failed(),
            &[PathBuf::from("/m/b.mp3"), PathBuf::from("/m/a.mp3")]
        );
        assert!(report.failed().contains(&PathBuf::from("/m/a.mp3")));
        assert!(report.artists().is_empty());
        assert!(!report.is_empty());
    }

    #[test]
    fn test_artist_named_failed_is_just_an_artist() {
        let mut report = ScanReport::new();
        report.insert(record("FAILED", "Debut", "Intro", Some(1), "/m/1.mp3"));
        assert!(report.failed().is_empty());
        assert!(report.get("FAILED", "Debut", TrackKey::Number(1)).is_some());
    }
}
