// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Body must not be empty")]
    EmptyBody,
    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Faults below the HTTP status level: the request never produced a
/// decodable response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    #[error("Failed to decode response body: {0}")]
    Decode(String),
    #[error("Failed to encode request body: {0}")]
    Encode(String),
}
