//! Error types for message composition.

use std::io;
use std::path::PathBuf;

/// Result type alias for composition operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Composition error types.
///
/// Serialization itself is total; only attachment ingestion can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Attachment source file could not be read.
    #[error("Failed to read attachment {}: {source}", path.display())]
    FileRead {
        /// Path handed to `attach_file`/`inline_file`.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
