//! Error types for the burger API client.
//!
//! # Design
//! Only faults that prevent a response from existing are errors: the
//! transport failed, or a body could not be (de)serialized. A 4xx/5xx reply
//! is a valid `HttpResponse` and never shows up here.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, TLS or I/O failure while talking to the service.
    #[error("transport failure: {0}")]
    Transport(#[from] ureq::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
