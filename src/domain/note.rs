// src/domain/note.rs
use crate::constants::{MAX_BODY_CHARS, MAX_TITLE_CHARS};
use crate::domain::{DomainError, Payload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A note as acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a note. Only constructible from drafts that
/// pass validation, so every value sent to the server is trimmed and
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    title: String,
    body: String,
}

impl NewNote {
    pub fn new(title: &str, body: &str) -> Result<Self, DomainError> {
        let title = title.trim();
        let body = body.trim();

        if title.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        if body.is_empty() {
            return Err(DomainError::EmptyBody);
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(DomainError::TooLong {
                field: "title",
                max: MAX_TITLE_CHARS,
            });
        }
        if body.chars().count() > MAX_BODY_CHARS {
            return Err(DomainError::TooLong {
                field: "body",
                max: MAX_BODY_CHARS,
            });
        }

        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Response of `GET /notes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteList {
    pub items: Vec<Note>,
}

impl NoteList {
    /// Lenient decoding of a list payload: a missing or non-array `items`
    /// field yields an empty list, and entries that are not valid notes are
    /// dropped.
    pub fn from_payload(payload: &Payload) -> Self {
        let Some(entries) = payload
            .as_json()
            .and_then(|json| json.get("items"))
            .and_then(|items| items.as_array())
        else {
            warn!("List response has no items array, treating as empty");
            return Self::default();
        };

        let items = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                match serde_json::from_value::<Note>(entry.clone()) {
                    Ok(note) => Some(note),
                    Err(e) => {
                        warn!(index, error = %e, "Skipping malformed note in list response");
                        None
                    }
                }
            })
            .collect();

        Self { items }
    }
}
