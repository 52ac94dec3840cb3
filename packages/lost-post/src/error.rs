//! Error types for the submission pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::draft::FieldErrors;

/// Failures of the network exchange with the posts service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be sent or the response body could not be read
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("posts service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Service answered 2xx but the body is not a posts collection
    #[error("malformed posts response: {0}")]
    Parse(#[source] serde_json::Error),

    /// Attachment part could not be encoded into the form
    #[error("could not encode attachment: {0}")]
    Encode(#[source] reqwest::Error),
}

/// Everything that can stop a submission cycle.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// One or more draft fields are invalid; nothing was sent
    #[error("draft is invalid: {0}")]
    Validation(FieldErrors),

    /// Another submission on the same pipeline has not finished yet
    #[error("a submission is already in progress")]
    InProgress,

    /// The posts service could not be reached or rejected the post
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<FieldErrors> for SubmitError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Failures while loading an attachment from disk.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("failed to read attachment {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("attachment path has no file name: {}", path.display())]
    NoFileName { path: PathBuf },
}

/// Result type alias for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, SubmitError>;
