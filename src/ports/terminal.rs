// src/ports/terminal.rs
use crate::application::StoreState;
use crate::domain::Note;
use crate::util::text::indent;
use chrono::Local;
use tracing::instrument;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the store state as plain text for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct TextPresenter {
    local_time: bool,
}

impl TextPresenter {
    pub fn new() -> Self {
        Self { local_time: true }
    }

    /// Timestamps in UTC instead of the local timezone
    pub fn utc() -> Self {
        Self { local_time: false }
    }

    pub fn render(&self, state: &StoreState) -> String {
        let refresh = if state.loading { "Loading…" } else { "Refresh" };
        let mut out = format!("Notes\n[{}]  Backend: GET/POST/DELETE /notes\n", refresh);

        if let Some(error) = self.render_error(state) {
            out.push_str(&error);
            out.push('\n');
        }

        out.push_str(&format!("\nNotes list ({})\n", state.items.len()));

        if state.loading {
            out.push_str("Loading…\n");
        } else if state.items.is_empty() {
            out.push_str("No notes yet. Create the first one.\n");
        } else {
            for note in &state.items {
                out.push_str(&self.render_note(note));
            }
        }

        out
    }

    #[instrument(level = "trace", skip(self))]
    fn render_note(&self, note: &Note) -> String {
        let updated = if self.local_time {
            note.updated_at
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string()
        } else {
            note.updated_at.format(TIMESTAMP_FORMAT).to_string()
        };

        format!(
            "\n* {}\n{}\n  ID: {}  Updated: {}\n",
            note.title,
            indent(&note.body, 2),
            note.id,
            updated
        )
    }

    /// Error line only, for commands that do not print the whole page
    pub fn render_error(&self, state: &StoreState) -> Option<String> {
        state.error().map(|error| format!("⚠️ {}", error))
    }
}

impl Default for TextPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_note() -> Note {
        Note {
            id: "n-1".to_string(),
            title: "Groceries".to_string(),
            body: "Milk\nEggs".to_string(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn given_empty_state_when_rendering_then_shows_empty_hint() {
        let output = TextPresenter::utc().render(&StoreState::default());

        assert!(output.contains("Notes list (0)"));
        assert!(output.contains("No notes yet. Create the first one."));
        assert!(output.contains("[Refresh]"));
    }

    #[test]
    fn given_loading_state_when_rendering_then_shows_loading_instead_of_list() {
        let state = StoreState {
            loading: true,
            items: vec![sample_note()],
            ..Default::default()
        };

        let output = TextPresenter::utc().render(&state);

        assert!(output.contains("[Loading…]"));
        assert!(!output.contains("Groceries"));
    }

    #[test]
    fn given_notes_when_rendering_then_shows_fields_of_each_note() {
        let state = StoreState {
            items: vec![sample_note()],
            ..Default::default()
        };

        let output = TextPresenter::utc().render(&state);

        assert!(output.contains("Notes list (1)"));
        assert!(output.contains("* Groceries"));
        assert!(output.contains("  Milk\n  Eggs"));
        assert!(output.contains("ID: n-1  Updated: 2024-01-01 12:30:00"));
    }

    #[test]
    fn given_error_when_rendering_then_shows_warning_line() {
        let state = StoreState {
            error: "not found".to_string(),
            ..Default::default()
        };

        let presenter = TextPresenter::utc();

        assert!(presenter.render(&state).contains("⚠️ not found"));
        assert_eq!(presenter.render_error(&state), Some("⚠️ not found".to_string()));
    }

    #[test]
    fn given_no_error_when_rendering_error_then_returns_none() {
        assert_eq!(TextPresenter::utc().render_error(&StoreState::default()), None);
    }
}
