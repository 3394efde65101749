// src/domain/outcome.rs
use crate::constants::{DETAILS_MARKER, GENERIC_FAILURE_MESSAGE};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }
}

/// A non-2xx response, reduced to what callers display or inspect.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub status: u16,
    pub message: String,
    pub payload: Payload,
}

impl ApiFailure {
    pub fn new(status: u16, payload: Payload) -> Self {
        Self {
            status,
            message: failure_message(&payload),
            payload,
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(Payload),
    Failure(ApiFailure),
}

impl RequestOutcome {
    pub fn into_result(self) -> Result<Payload, ApiFailure> {
        match self {
            RequestOutcome::Success(payload) => Ok(payload),
            RequestOutcome::Failure(failure) => Err(failure),
        }
    }
}

/// Human-readable message for a failed response body.
///
/// Text bodies are used verbatim. JSON bodies use their `error` field when
/// it is set, marked when `details` are attached as well.
pub fn failure_message(payload: &Payload) -> String {
    let json = match payload {
        Payload::Text(text) => return text.clone(),
        Payload::Json(Value::String(text)) => return text.clone(),
        Payload::Json(json) => json,
    };

    match json.get("error").filter(|error| is_set(error)) {
        Some(error) => {
            let mut message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if json.get("details").is_some_and(is_set) {
                message.push_str(DETAILS_MARKER);
            }
            message
        }
        None => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}

// null, false, zero and "" count as absent
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
