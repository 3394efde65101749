// src/cli/shell.rs
use crate::application::{NotesStore, OperationStatus, Transport};
use crate::ports::TextPresenter;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  refresh          reload notes from the server
  title <text>     set the title draft
  body <text>      set the body draft
  create           create a note from the drafts
  delete <id>      delete a note
  clear            clear drafts and error
  show             print the page
  help             show this help
  quit             leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Refresh,
    Title(String),
    Body(String),
    Create,
    Delete(String),
    Clear,
    Show,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };

        match word {
            "refresh" | "r" => Ok(ShellCommand::Refresh),
            "title" => Ok(ShellCommand::Title(rest.to_string())),
            "body" => Ok(ShellCommand::Body(rest.to_string())),
            "create" => Ok(ShellCommand::Create),
            "delete" | "rm" => {
                let id = rest.trim();
                if id.is_empty() {
                    Err("delete needs a note id".to_string())
                } else {
                    Ok(ShellCommand::Delete(id.to_string()))
                }
            }
            "clear" => Ok(ShellCommand::Clear),
            "show" | "ls" => Ok(ShellCommand::Show),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("Unknown command '{}', try 'help'", other)),
        }
    }
}

/// Read commands from `input` until EOF or `quit`, printing to `output`.
pub async fn run_shell<T, R, W>(
    store: &mut NotesStore<T>,
    presenter: &TextPresenter,
    input: R,
    mut output: W,
) -> Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    store.activate().await;
    write!(output, "{}", presenter.render(store.state()))?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{}", message)?;
                continue;
            }
        };
        debug!(?command, "Shell command");

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => writeln!(output, "{}", HELP)?,
            ShellCommand::Title(title) => store.set_title(&title),
            ShellCommand::Body(body) => store.set_body(&body),
            ShellCommand::Clear => store.clear_form(),
            ShellCommand::Show => write!(output, "{}", presenter.render(store.state()))?,
            ShellCommand::Refresh => {
                store.load().await;
                write!(output, "{}", presenter.render(store.state()))?;
            }
            ShellCommand::Create => {
                if store.create().await == OperationStatus::Skipped {
                    writeln!(output, "Title and body are required")?;
                } else {
                    write!(output, "{}", presenter.render(store.state()))?;
                }
            }
            ShellCommand::Delete(id) => {
                store.delete(&id).await;
                write!(output, "{}", presenter.render(store.state()))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HttpMethod;
    use crate::util::testing::{note_json, MockTransport};
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn given_command_lines_when_parsing_then_returns_commands() {
        assert_eq!(ShellCommand::parse("refresh"), Ok(ShellCommand::Refresh));
        assert_eq!(
            ShellCommand::parse("title  Hello world"),
            Ok(ShellCommand::Title(" Hello world".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("delete abc "),
            Ok(ShellCommand::Delete("abc".to_string()))
        );
        assert_eq!(ShellCommand::parse("quit\n"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn given_delete_without_id_when_parsing_then_returns_error() {
        assert!(ShellCommand::parse("delete").is_err());
    }

    #[test]
    fn given_unknown_word_when_parsing_then_returns_error() {
        assert!(ShellCommand::parse("frobnicate").is_err());
    }

    #[tokio::test]
    async fn given_script_when_running_shell_then_loads_once_and_creates_note() {
        // Arrange
        let mock = MockTransport::builder()
            .with_json(HttpMethod::Get, "/notes", json!({"items": []}))
            .with_json(HttpMethod::Post, "/notes", note_json("1", "Hi", "World"))
            .build();
        let mut store = NotesStore::new(mock);
        let input = Cursor::new("title  Hi \nbody World\ncreate\nquit\nrefresh\n");
        let mut output = Vec::new();

        // Act
        run_shell(&mut store, &TextPresenter::utc(), input, &mut output)
            .await
            .expect("Shell should run");

        // Assert
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("No notes yet. Create the first one."));
        assert!(text.contains("* Hi"));
        assert_eq!(store.state().items.len(), 1);
        assert_eq!(store.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn given_empty_drafts_when_creating_in_shell_then_reports_missing_fields() {
        let mock = MockTransport::builder()
            .with_json(HttpMethod::Get, "/notes", json!({"items": []}))
            .build();
        let mut store = NotesStore::new(mock);
        let mut output = Vec::new();

        run_shell(
            &mut store,
            &TextPresenter::utc(),
            Cursor::new("create\n"),
            &mut output,
        )
        .await
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Title and body are required"));
        assert_eq!(store.transport().requests().len(), 1);
    }
}
