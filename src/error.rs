//! Errors raised while ingesting row data.
//!
//! Normalization and scoring never fail; only turning external JSON into
//! rows can.

use thiserror::Error;

/// Errors produced by [`rows_from_json`](crate::row::rows_from_json).
#[derive(Debug, Error)]
pub enum Error {
    /// The payload is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not an array.
    #[error("expected a JSON array of rows, found {found}")]
    NotAnArray {
        /// Kind of JSON value that was found instead.
        found: &'static str,
    },

    /// An element of the array is not a JSON object.
    #[error("row {index} is not a JSON object")]
    RowNotObject {
        /// Zero-based position of the offending element.
        index: usize,
    },
}

/// Result alias used by fallible functions in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
