// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::Transport;
use crate::domain::{ApiFailure, HttpMethod, Payload, RequestOutcome, TransportError};

/// A request as seen by `MockTransport`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Outcome(RequestOutcome),
    Fault(TransportError),
}

type Route = (HttpMethod, String);

/// Shared mock transport for testing the notes store without a server
///
/// Responses are configured per method and path. Several responses for the
/// same route are served in order; the last one is repeated once the queue
/// is drained. Unconfigured routes answer with a 404 text failure.
///
/// # Examples
///
/// ```
/// use notes_client::domain::HttpMethod;
/// use notes_client::util::testing::MockTransport;
/// use serde_json::json;
///
/// let mock = MockTransport::builder()
///     .with_json(HttpMethod::Get, "/notes", json!({"items": []}))
///     .with_failure(HttpMethod::Delete, "/notes/1", 404, json!({"error": "not found"}))
///     .build();
/// ```
pub struct MockTransport {
    routes: Mutex<HashMap<Route, VecDeque<MockResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder::new()
    }

    /// All requests received so far, in call order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("mock transport lock poisoned")
            .clone()
    }

    fn next_response(&self, method: HttpMethod, path: &str) -> MockResponse {
        let mut routes = self.routes.lock().expect("mock transport lock poisoned");
        let queue = routes.get_mut(&(method, path.to_string()));

        match queue {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .expect("queue has more than one response"),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => MockResponse::Outcome(RequestOutcome::Failure(ApiFailure::new(
                404,
                Payload::Text(format!("no mock for {} {}", method, path)),
            ))),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<RequestOutcome, TransportError> {
        self.requests
            .lock()
            .expect("mock transport lock poisoned")
            .push(RecordedRequest {
                method,
                path: path.to_string(),
                body,
            });

        match self.next_response(method, path) {
            MockResponse::Outcome(outcome) => Ok(outcome),
            MockResponse::Fault(fault) => Err(fault),
        }
    }
}

/// Builder for MockTransport
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockTransportBuilder {
    routes: HashMap<Route, VecDeque<MockResponse>>,
}

impl MockTransportBuilder {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    fn push(mut self, method: HttpMethod, path: &str, response: MockResponse) -> Self {
        self.routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    /// Answer with a 2xx JSON payload
    pub fn with_json(self, method: HttpMethod, path: &str, body: Value) -> Self {
        self.push(
            method,
            path,
            MockResponse::Outcome(RequestOutcome::Success(Payload::Json(body))),
        )
    }

    /// Answer with a 2xx text payload
    pub fn with_text(self, method: HttpMethod, path: &str, body: &str) -> Self {
        self.push(
            method,
            path,
            MockResponse::Outcome(RequestOutcome::Success(Payload::Text(body.to_string()))),
        )
    }

    /// Answer with a non-2xx JSON payload
    pub fn with_failure(self, method: HttpMethod, path: &str, status: u16, body: Value) -> Self {
        self.push(
            method,
            path,
            MockResponse::Outcome(RequestOutcome::Failure(ApiFailure::new(
                status,
                Payload::Json(body),
            ))),
        )
    }

    /// Answer with a non-2xx text payload
    pub fn with_text_failure(self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        self.push(
            method,
            path,
            MockResponse::Outcome(RequestOutcome::Failure(ApiFailure::new(
                status,
                Payload::Text(body.to_string()),
            ))),
        )
    }

    /// Fail below the HTTP level
    pub fn with_fault(self, method: HttpMethod, path: &str, fault: TransportError) -> Self {
        self.push(method, path, MockResponse::Fault(fault))
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            routes: Mutex::new(self.routes),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MockTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Note as the server would serialize it, with a fixed timestamp.
pub fn note_json(id: &str, title: &str, body: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "body": body,
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "wiremock"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
