//! Test utilities and fixtures for song-info tests.
//!
//! Real audio fixtures are awkward to build on the fly, so scanner and
//! extraction tests use [`FakeReader`]: a [`TagReader`] that reads tags from
//! plain `key=value` text files written by [`write_track`].
//!
//! # Example
//!
//! ```ignore
//! let dir = tempfile::tempdir().unwrap();
//! write_track(dir.path(), "A/song1.mp3", "X", "Y", "T1", Some(1));
//! write_file(dir.path(), "A/notes.txt", "not a track");
//! let report = scanner::scan(dir.path(), &FakeReader, &ScanOptions::default())?;
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::metadata::TagReader;
use crate::model::TrackRecord;

/// Reads `artist=`, `album=`, `title=` and `track=` lines from a text file.
///
/// A file without any of those keys yields [`Error::MetadataNotFound`],
/// much like a real parser facing a non-audio file.
pub struct FakeReader;

impl TagReader for FakeReader {
    fn read(&self, path: &Path) -> Result<TrackRecord> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::read(path, e.to_string()))?;

        let mut record = TrackRecord {
            artist: None,
            album: None,
            title: None,
            track_number: None,
            source_path: path.to_path_buf(),
        };
        let mut found = false;

        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.to_string();
            match key {
                "artist" => record.artist = Some(value),
                "album" => record.album = Some(value),
                "title" => record.title = Some(value),
                "track" => {
                    let n = value
                        .parse()
                        .map_err(|_| Error::read(path, format!("bad track number {value:?}")))?;
                    record.track_number = Some(n);
                }
                _ => continue,
            }
            found = true;
        }

        if found {
            Ok(record)
        } else {
            Err(Error::metadata_not_found(path))
        }
    }
}

/// Writes `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create test directory");
    }
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Writes a file [`FakeReader`] reads back as the given tags.
pub fn write_track(
    root: &Path,
    rel: &str,
    artist: &str,
    album: &str,
    title: &str,
    track: Option<u32>,
) -> PathBuf {
    let mut contents = format!("artist={artist}\nalbum={album}\ntitle={title}\n");
    if let Some(n) = track {
        contents.push_str(&format!("track={n}\n"));
    }
    write_file(root, rel, &contents)
}

/// Creates a fully tagged TrackRecord.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let untitled = TrackRecord {
///     title: None,
///     ..record("X", "Y", "T", Some(1), "/m/a.mp3")
/// };
/// ```
pub fn record(
    artist: &str,
    album: &str,
    title: &str,
    track: Option<u32>,
    path: &str,
) -> TrackRecord {
    TrackRecord {
        artist: Some(artist.to_string()),
        album: Some(album.to_string()),
        title: Some(title.to_string()),
        track_number: track,
        source_path: PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_reader_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_track(dir.path(), "a.mp3", "X", "Y", "T", Some(7));

        let rec = FakeReader.read(&path).unwrap();
        assert_eq!(rec, record("X", "Y", "T", Some(7), path.to_str().unwrap()));
    }

    #[test]
    fn test_fake_reader_rejects_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "notes.txt", "hello");
        assert!(matches!(FakeReader.read(&path), Err(Error::MetadataNotFound(_))));
    }
}
