use notes_client::application::NotesStore;
use notes_client::cli::args::Command;
use notes_client::domain::{HttpMethod, Note};
use notes_client::execute;
use notes_client::ports::TextPresenter;
use notes_client::util::testing::{note_json, MockTransport};
use serde_json::json;
use std::io::Cursor;
use std::process::ExitCode;

async fn run_command(store: &mut NotesStore<MockTransport>, command: Command) -> (ExitCode, String) {
    let mut output = Vec::new();
    let code = execute(
        command,
        store,
        &TextPresenter::utc(),
        Cursor::new(""),
        &mut output,
    )
    .await
    .expect("Command should run");
    (code, String::from_utf8(output).expect("Output should be UTF-8"))
}

#[tokio::test]
async fn given_notes_when_listing_as_json_then_prints_note_array() {
    // Arrange
    let mock = MockTransport::builder()
        .with_json(HttpMethod::Get, "/notes", json!({"items": [note_json("1", "A", "a")]}))
        .build();
    let mut store = NotesStore::new(mock);

    // Act
    let (code, output) = run_command(&mut store, Command::List { json: true }).await;

    // Assert
    assert_eq!(code, ExitCode::SUCCESS);
    let notes: Vec<Note> = serde_json::from_str(&output).expect("Output should be JSON");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, "1");
}

#[tokio::test]
async fn given_failing_server_when_listing_as_json_then_prints_only_error_line() {
    let mock = MockTransport::builder()
        .with_text_failure(HttpMethod::Get, "/notes", 500, "upstream down")
        .build();
    let mut store = NotesStore::new(mock);

    let (code, output) = run_command(&mut store, Command::List { json: true }).await;

    assert_eq!(code, ExitCode::FAILURE);
    assert_eq!(output, "⚠️ upstream down\n");
}

#[tokio::test]
async fn given_failing_server_when_listing_as_page_then_prints_page_with_error() {
    let mock = MockTransport::builder()
        .with_text_failure(HttpMethod::Get, "/notes", 500, "upstream down")
        .build();
    let mut store = NotesStore::new(mock);

    let (code, output) = run_command(&mut store, Command::List { json: false }).await;

    assert_eq!(code, ExitCode::FAILURE);
    assert!(output.contains("⚠️ upstream down"));
    assert!(output.contains("Notes list (0)"));
}

#[tokio::test]
async fn given_valid_note_when_creating_then_loads_once_and_renders_new_note() {
    // Arrange
    let mock = MockTransport::builder()
        .with_json(HttpMethod::Get, "/notes", json!({"items": []}))
        .with_json(HttpMethod::Post, "/notes", note_json("7", "Hi", "World"))
        .build();
    let mut store = NotesStore::new(mock);
    let command = Command::Create {
        title: " Hi ".to_string(),
        body: " World ".to_string(),
    };

    // Act
    let (code, output) = run_command(&mut store, command).await;

    // Assert
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(output.contains("Notes list (1)"));
    assert!(output.contains("* Hi"));
    let methods: Vec<_> = store
        .transport()
        .requests()
        .iter()
        .map(|r| r.method)
        .collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);
}

#[tokio::test]
async fn given_blank_title_when_creating_then_fails_without_request() {
    let mut store = NotesStore::new(MockTransport::builder().build());
    let command = Command::Create {
        title: "  ".to_string(),
        body: "World".to_string(),
    };

    let result = execute(
        command,
        &mut store,
        &TextPresenter::utc(),
        Cursor::new(""),
        Vec::<u8>::new(),
    )
    .await;

    assert!(result.is_err());
    assert!(store.transport().requests().is_empty());
}

#[tokio::test]
async fn given_missing_note_when_deleting_then_exit_code_is_failure() {
    let mock = MockTransport::builder()
        .with_json(HttpMethod::Get, "/notes", json!({"items": [note_json("1", "A", "a")]}))
        .with_failure(HttpMethod::Delete, "/notes/1", 404, json!({"error": "not found"}))
        .build();
    let mut store = NotesStore::new(mock);

    let (code, output) = run_command(&mut store, Command::Delete { id: "1".to_string() }).await;

    assert_eq!(code, ExitCode::FAILURE);
    assert!(output.contains("⚠️ not found"));
    assert_eq!(store.state().items.len(), 1);
}
