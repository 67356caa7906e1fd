//! Audio file tag reading.
//!
//! [`TagReader`] is the seam between the scanner and whatever parses tags.
//! [`LoftyReader`] is the production implementation, backed by the lofty
//! crate, which handles MP3 (ID3v1/ID3v2), FLAC, OGG, M4A, WAV and more.
//!
//! # Failure classification
//! - Unknown format, or a recognised file with no tag at all:
//!   [`Error::MetadataNotFound`]
//! - Anything else lofty or the OS reports: [`Error::Read`]

use lofty::error::{ErrorKind, LoftyError};
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::TrackRecord;

/// Reads tag data from a single file.
///
/// Implementations must be shareable across threads so the scanner can
/// fan reads out over a worker pool.
pub trait TagReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<TrackRecord>;
}

/// Which tag field supplies the artist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtistSource {
    /// Album artist (ID3 `TPE2`), grouping compilations under one name
    #[default]
    AlbumArtist,
    /// Track artist (ID3 `TPE1`)
    Artist,
}

/// [`TagReader`] backed by lofty.
#[derive(Debug, Clone, Default)]
pub struct LoftyReader {
    artist_source: ArtistSource,
}

impl LoftyReader {
    pub fn new(artist_source: ArtistSource) -> Self {
        Self { artist_source }
    }

    fn artist(&self, tag: &Tag) -> Option<String> {
        match self.artist_source {
            ArtistSource::AlbumArtist => tag.get_string(&ItemKey::AlbumArtist).map(str::to_string),
            ArtistSource::Artist => tag.artist().map(|s| s.to_string()),
        }
    }
}

impl TagReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<TrackRecord> {
        // Sniff the content first; the extension is only a fallback
        let tagged_file = Probe::open(path)
            .map_err(|e| classify(path, e))?
            .guess_file_type()
            .map_err(|e| Error::read(path, e.to_string()))?
            .read()
            .map_err(|e| classify(path, e))?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| Error::metadata_not_found(path))?;

        Ok(TrackRecord {
            artist: self.artist(tag),
            album: tag.album().map(|s| s.to_string()),
            title: tag.title().map(|s| s.to_string()),
            track_number: tag.track(),
            source_path: path.to_path_buf(),
        })
    }
}

fn classify(path: &Path, err: LoftyError) -> Error {
    match err.kind() {
        ErrorKind::UnknownFormat => Error::metadata_not_found(path),
        _ => Error::read(path, err.to_string()),
    }
}
