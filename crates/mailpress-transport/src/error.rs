//! Error types for delivery operations.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Delivery error types.
///
/// No retries happen at this layer; every failure propagates to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The SMTP submission primitive reported a failure.
    #[error("SMTP submission failed: {0}")]
    Smtp(String),

    /// The local mail-submission binary could not be started.
    #[error("Could not spawn {}: {source}", path.display())]
    Spawn {
        /// Binary the transport tried to run.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The serialized message could not be written to the binary's stdin.
    #[error("Failed to write message to sendmail stdin: {0}")]
    Stdin(#[source] io::Error),

    /// Waiting for the binary to finish failed.
    #[error("Sendmail did not run to completion: {0}")]
    Wait(#[source] io::Error),

    /// The binary exited with a non-zero status.
    #[error("Sendmail exited with {0}")]
    Exit(ExitStatus),
}
