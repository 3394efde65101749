// src/constants.rs
//
// Application-wide constants shared by the domain, transport and presentation layers.

/// Maximum number of characters accepted for a note title.
///
/// Drafts are truncated to this length on input and longer titles are
/// rejected before any request is sent.
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum number of characters accepted for a note body.
pub const MAX_BODY_CHARS: usize = 2000;

/// Base address used when neither the CLI, the environment nor the config file set one.
pub const DEFAULT_BASE_URL: &str = "/api";

/// Origin a relative base address is resolved against.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Environment variable overriding the configured base address.
pub const BASE_URL_ENV_VAR: &str = "NOTES_API_BASE_URL";

/// Message for a failed response that carries neither text nor a JSON `error` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Appended to a JSON `error` message when the payload also has `details`.
///
/// Used in: `domain/outcome.rs`
pub const DETAILS_MARKER: &str = " (see details)";

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load notes";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create note";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete note";
