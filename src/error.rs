//! Error type shared by the loader and the streaming handlers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the route guide.
///
/// A missing feature is never an error; lookups return the unnamed
/// sentinel instead.
#[derive(Debug, Error)]
pub enum RouteGuideError {
    /// Reading the next input element or writing the next output
    /// element failed. Aborts the current call.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The dataset file could not be read.
    #[error("failed to read feature dataset {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a JSON list of features.
    #[error("failed to parse feature dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RouteGuideError>;
