//! Error types for the posts admin client.
//!
//! # Design
//! Every failed call surfaces as an `ApiError`. `NotFound` keeps its own
//! variant because callers frequently distinguish a missing record from a
//! generic failure; other non-2xx responses carry the raw status and body.
//! `kind()` folds the variants into a coarse `FailureKind` so a presentation
//! layer can pick user-visible handling without matching on details.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced an HTTP response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The operation was rejected before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse failure category of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Client,
    Server,
    Decode,
    Encode,
    InvalidInput,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::NotFound => FailureKind::Client,
            ApiError::HttpError { status, .. } if *status >= 500 => FailureKind::Server,
            ApiError::HttpError { .. } => FailureKind::Client,
            ApiError::DeserializationError(_) => FailureKind::Decode,
            ApiError::SerializationError(_) => FailureKind::Encode,
            ApiError::Transport(_) => FailureKind::Network,
            ApiError::InvalidInput(_) => FailureKind::InvalidInput,
        }
    }
}
