//! Error types for the Imperial API client.
//!
//! # Design
//! `Api` gets a dedicated variant because callers frequently distinguish
//! "the server rejected the request" from "the request never completed."
//! A response that arrives but holds no decodable envelope is `MissingResponse`
//! — the server answered, but not in a shape we can hand back to the caller.

use std::fmt;

/// Errors returned by [`crate::ImperialClient`] and [`crate::Transport`].
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be executed (connection, TLS, invalid URL, ...).
    Transport(reqwest::Error),

    /// The server responded, but the body was empty or not a decodable
    /// envelope. Fatal for create/edit/get; delete synthesizes an envelope
    /// from the status code instead.
    MissingResponse,

    /// The server completed the request with `success: false`. Carries the
    /// server's error message.
    Api(String),

    /// The envelope claimed success but carried no document.
    MissingData,

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "transport error: {e}"),
            ApiError::MissingResponse => write!(f, "response held no decodable body"),
            ApiError::Api(message) => write!(f, "API error: {message}"),
            ApiError::MissingData => write!(f, "successful response carried no document"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}
