use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use thiserror::Error;

/// Why a single user-search call failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Reqwest(#[from] ReqwestError),
    #[error("invalid query syntax: {0}")]
    InvalidQuery(String),
    #[error("permission denied or rate limited: {0}")]
    Forbidden(String),
    #[error("unexpected client error ({status}): {body}")]
    Client { status: StatusCode, body: String },
    #[error("unexpected server error ({status}): {body}")]
    Server { status: StatusCode, body: String },
    #[error("unexpected response body: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// What the user sees when a fetch fails. Causes are not distinguished here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Something went wrong. Please try again.")]
    SearchFailed,
    #[error("Unable to load more users. Please try again.")]
    LoadMoreFailed,
}
