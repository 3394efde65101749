use notes_client::infrastructure::HttpTransport;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Base path the test server serves the API under
pub const API_PREFIX: &str = "/api";

#[allow(dead_code)]
/// Transport pointed at `<server>/api`
pub fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(&format!("{}{}", server.uri(), API_PREFIX))
        .expect("Mock server URI should be a valid base address")
}

#[allow(dead_code)]
/// API path as the server sees it
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Note as returned by the server
#[allow(dead_code)]
pub fn note(id: &str, title: &str, body: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "body": body,
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

/// Known note IDs used across tests
#[allow(dead_code)]
pub mod test_notes {
    pub const FIRST: &str = "1";
    pub const SECOND: &str = "2";
    pub const NONEXISTENT: &str = "does-not-exist";
}
