/// Catalog REST API
///
/// This module handles:
/// - Issuing GET requests against the configured API base (client.rs)
/// - Reshaping JSON arrays into id-keyed maps (mapping.rs)

pub mod client;
pub mod mapping;

pub use client::ServiceApi;

use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while talking to the catalog API
///
/// Cloneable so results can travel inside UI messages.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("Server is not responding, response status {0}")]
    Status(StatusCode),

    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Request(Arc<reqwest::Error>),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Request(Arc::new(error))
    }
}
