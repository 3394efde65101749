// src/infrastructure/http.rs
use crate::application::Transport;
use crate::domain::{ApiFailure, DomainError, HttpMethod, Payload, RequestOutcome, TransportError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::{debug, instrument, trace};

const JSON_MEDIA_TYPE: &str = "application/json";

/// `Transport` over HTTP, rooted at an absolute base address.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, DomainError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, DomainError> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| {
            DomainError::ConfigError(format!("Invalid base address '{}': {}", base_url, e))
        })?;

        debug!(base_url, "Creating HTTP transport");
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(level = "debug", skip(self, body))]
    async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<RequestOutcome, TransportError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(to_method(method), url.as_str())
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE);

        if let Some(body) = body {
            let bytes =
                serde_json::to_vec(&body).map_err(|e| TransportError::Encode(e.to_string()))?;
            request = request.body(bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains(JSON_MEDIA_TYPE));

        // Error bodies may be JSON or text, so decode before looking at the status
        let payload = if is_json {
            let value = response
                .json::<Value>()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()))?;
            Payload::Json(value)
        } else {
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()))?;
            Payload::Text(text)
        };

        debug!(%url, status = status.as_u16(), is_json, "Received response");
        trace!(?payload, "Response payload");

        if status.is_success() {
            Ok(RequestOutcome::Success(payload))
        } else {
            Ok(RequestOutcome::Failure(ApiFailure::new(
                status.as_u16(),
                payload,
            )))
        }
    }
}
