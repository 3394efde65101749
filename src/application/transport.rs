// src/application/transport.rs
use crate::domain::{HttpMethod, RequestOutcome, TransportError};
use async_trait::async_trait;
use serde_json::Value;

/// Collection endpoint, relative to the configured base address.
pub const NOTES_PATH: &str = "/notes";

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request against `base address + path`.
    ///
    /// Non-2xx responses are returned as `RequestOutcome::Failure`; only
    /// faults that prevent a decoded response are returned as errors.
    async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<RequestOutcome, TransportError>;
}
