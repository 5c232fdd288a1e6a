// Error types shared by the library.
//
// Only `FileAccess` stops a batch run; everything else is raised by a
// single lookup and handled by the batch loop.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// The annotation service answered with a non-ok status (>= 400).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Annotation website returned bad response\nstatus_code:{status}\nerror:{body}")]
pub struct AnnotationError {
    pub status: u16,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// Input file missing or unreadable
    #[error("failed to read variant list {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    /// Request never produced a response (DNS, connect, read failure)
    #[error("HTTP request failed: {message}")]
    Request {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Body was not the expected JSON shape
    #[error("malformed annotation response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}
