//! Error types for CRD schema extraction

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the extractor's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extraction error types
///
/// Every variant is contained at the scope it occurs in (one source, one
/// document or one output file) and never aborts a run.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failure while fetching a source
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single YAML document could not be decoded
    #[error("Failed to decode YAML document {document}: {source}")]
    Decode {
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    /// Normalized schema could not be marshaled to JSON
    #[error("Failed to marshal schema to JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Output file could not be written
    #[error("Failed to write schema to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a write error for an output path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a read error for a local source path
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }
}
