// src/application/notes_store.rs
use crate::application::transport::{Transport, NOTES_PATH};
use crate::constants::{
    CREATE_FAILED_MESSAGE, DELETE_FAILED_MESSAGE, LOAD_FAILED_MESSAGE, MAX_BODY_CHARS,
    MAX_TITLE_CHARS,
};
use crate::domain::{HttpMethod, NewNote, Note, NoteList, Payload, RequestOutcome, TransportError};
use crate::util::text::truncate_chars;
use tracing::{debug, info, instrument, warn};

/// Everything a presenter needs to render the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub items: Vec<Note>,
    pub loading: bool,
    pub busy: bool,
    /// Most recent failure message, empty when the last operation succeeded.
    pub error: String,
    pub title: String,
    pub body: String,
}

impl StoreState {
    pub fn error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Succeeded,
    Failed,
    /// Create was not attempted because the drafts did not validate.
    Skipped,
}

/// Owns the local notes collection and keeps it in step with the server.
///
/// Every operation clears `error`, raises its activity flag for the
/// duration of the request and lowers it again whatever the outcome. The
/// collection only changes after a successful response.
pub struct NotesStore<T: Transport> {
    transport: T,
    state: StoreState,
    activated: bool,
}

impl<T: Transport> NotesStore<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: StoreState::default(),
            activated: false,
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Initial load. Runs once per store; later calls return `None`.
    pub async fn activate(&mut self) -> Option<OperationStatus> {
        if self.activated {
            debug!("Store already activated, skipping initial load");
            return None;
        }
        self.activated = true;
        Some(self.load().await)
    }

    pub fn set_title(&mut self, title: &str) {
        self.state.title = truncate_chars(title, MAX_TITLE_CHARS);
    }

    pub fn set_body(&mut self, body: &str) {
        self.state.body = truncate_chars(body, MAX_BODY_CHARS);
    }

    pub fn can_create(&self) -> bool {
        NewNote::new(&self.state.title, &self.state.body).is_ok()
    }

    /// Reset both drafts and any displayed error.
    pub fn clear_form(&mut self) {
        self.state.title.clear();
        self.state.body.clear();
        self.state.error.clear();
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn load(&mut self) -> OperationStatus {
        self.state.error.clear();
        self.state.loading = true;

        let result = self
            .transport
            .request(NOTES_PATH, HttpMethod::Get, None)
            .await;

        let status = match settle(result) {
            Ok(payload) => {
                self.state.items = NoteList::from_payload(&payload).items;
                info!(count = self.state.items.len(), "Loaded notes");
                OperationStatus::Succeeded
            }
            Err(message) => self.fail(message, LOAD_FAILED_MESSAGE),
        };

        self.state.loading = false;
        status
    }

    /// Create a note from the current drafts.
    #[instrument(level = "debug", skip(self))]
    pub async fn create(&mut self) -> OperationStatus {
        let new_note = match NewNote::new(&self.state.title, &self.state.body) {
            Ok(new_note) => new_note,
            Err(reason) => {
                debug!(%reason, "Draft not valid, skipping create");
                return OperationStatus::Skipped;
            }
        };

        self.state.error.clear();
        self.state.busy = true;

        let result = match serde_json::to_value(&new_note) {
            Ok(body) => {
                self.transport
                    .request(NOTES_PATH, HttpMethod::Post, Some(body))
                    .await
            }
            Err(e) => Err(TransportError::Encode(e.to_string())),
        };

        let status = match settle(result).and_then(decode_created) {
            Ok(note) => {
                info!(note_id = %note.id, "Created note");
                self.state.items.insert(0, note);
                self.state.title.clear();
                self.state.body.clear();
                OperationStatus::Succeeded
            }
            Err(message) => self.fail(message, CREATE_FAILED_MESSAGE),
        };

        self.state.busy = false;
        status
    }

    /// Set both drafts and create in one step.
    pub async fn create_note(&mut self, title: &str, body: &str) -> OperationStatus {
        self.set_title(title);
        self.set_body(body);
        self.create().await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn delete(&mut self, id: &str) -> OperationStatus {
        self.state.error.clear();
        self.state.busy = true;

        let path = format!("{}/{}", NOTES_PATH, urlencoding::encode(id));
        let result = self.transport.request(&path, HttpMethod::Delete, None).await;

        let status = match settle(result) {
            Ok(_) => {
                let before = self.state.items.len();
                self.state.items.retain(|note| note.id != id);
                info!(
                    note_id = id,
                    removed = before - self.state.items.len(),
                    "Deleted note"
                );
                OperationStatus::Succeeded
            }
            Err(message) => self.fail(message, DELETE_FAILED_MESSAGE),
        };

        self.state.busy = false;
        status
    }

    fn fail(&mut self, message: String, fallback: &str) -> OperationStatus {
        self.state.error = if message.is_empty() {
            fallback.to_string()
        } else {
            message
        };
        warn!(error = %self.state.error, "Operation failed");
        OperationStatus::Failed
    }
}

/// Collapse API failures and transport faults into the message shown to the user.
fn settle(result: Result<RequestOutcome, TransportError>) -> Result<Payload, String> {
    match result {
        Ok(outcome) => outcome.into_result().map_err(|failure| {
            debug!(status = failure.status, payload = ?failure.payload, "Request rejected");
            failure.message
        }),
        Err(e) => Err(e.to_string()),
    }
}

fn decode_created(payload: Payload) -> Result<Note, String> {
    match payload {
        Payload::Json(value) => serde_json::from_value(value)
            .map_err(|e| format!("Invalid note in response: {}", e)),
        Payload::Text(_) => Err("Invalid note in response: expected JSON".to_string()),
    }
}
