//! Error types for output writers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing output files.
#[derive(Error, Debug)]
pub enum OutputError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The finished temporary file could not be moved into place.
    #[error("Failed to move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
