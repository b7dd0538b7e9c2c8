//! Error types for HTTP scenarios

use reqwest::StatusCode;
use sitecheck_common::Mismatch;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {path}: expected status {expected}, got {actual}")]
    UnexpectedStatus {
        method: String,
        path: String,
        expected: StatusCode,
        actual: StatusCode,
    },

    #[error("{method} {path}: response body is empty")]
    MissingBody { method: String, path: String },

    #[error("{path}: cannot decode response body: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: expected {expected} items, got {actual}")]
    Count {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("field '{field}': expected {expected}, got {actual}")]
    Value {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Record mismatch: {0}")]
    Mismatch(#[from] Mismatch),

    #[error("Record error: {0}")]
    Record(#[from] sitecheck_common::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;
