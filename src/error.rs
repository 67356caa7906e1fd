//! Application-wide error types.
//!
//! Library modules return [`Error`] via the [`Result`] alias, while the
//! CLI edge (`main`, [`crate::cli`]) uses `anyhow` for propagation.
//!
//! # Taxonomy
//!
//! - [`Error::MetadataNotFound`] and [`Error::Read`] are per-file failures.
//!   The scanner recovers from them and never lets them escape a directory
//!   scan (see [`Error::is_per_file`]).
//! - [`Error::Scan`] means the root itself could not be traversed. It aborts
//!   the run with no partial output.
//! - The rest are I/O and rendering failures at the edges.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file carries no usable tag data (not audio, corrupt header, no tag).
    #[error("No metadata found in {}", .0.display())]
    MetadataNotFound(PathBuf),

    /// I/O or parse-level failure while reading tags.
    #[error("Failed to read tags from {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    /// The scan root is missing, not a directory, or not traversable.
    #[error("Cannot scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An artist name collides with a reserved key of the legacy layout.
    #[error("Artist name {key:?} collides with the failure list key; use the split layout")]
    ReservedKey { key: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a metadata-not-found error.
    pub fn metadata_not_found(path: impl Into<PathBuf>) -> Self {
        Self::MetadataNotFound(path.into())
    }

    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a scan error for the given root.
    pub fn scan(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Scan {
            path: path.into(),
            source,
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error concerns a single file and is recoverable by a scan.
    pub fn is_per_file(&self) -> bool {
        match self {
            Self::MetadataNotFound(_) | Self::Read { .. } => true,
            Self::WithContext { source, .. } => source.is_per_file(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
