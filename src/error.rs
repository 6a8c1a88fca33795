use std::path::PathBuf;

use thiserror::Error;

use crate::api::predictor::ApiError;

/// Application-level errors surfaced to the user by the command layer
#[derive(Debug, Error)]
pub enum AppError {
    /// No ticker text supplied after trimming
    #[error("Enter at least one ticker")]
    EmptyInput,

    /// A required output hook is absent or unusable
    #[error("Missing output location: {}", .0.display())]
    MissingOutput(PathBuf),

    /// The backend request failed or returned an undecodable body
    #[error("Failed to fetch scores: {0}")]
    Api(#[from] ApiError),

    /// Response entries do not line up 1:1 with the requested tickers
    #[error("Backend returned {returned} result(s) for {requested} ticker(s)")]
    MismatchedResults { requested: usize, returned: usize },

    /// A newer request for the same target cancelled this one
    #[error("Request superseded by a newer one")]
    Superseded,

    /// Chart rendering failed
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Writing rendered output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
