// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::application::{NotesStore, Transport};
use crate::cli::args::{Args, Command};
use crate::domain::NewNote;
use anyhow::{Context, Result};
use infrastructure::{Config, HttpTransport};
use ports::TextPresenter;
use std::io::{BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, info};

pub async fn run(args: Args) -> Result<ExitCode> {
    debug!(?args, "Starting notes-client with arguments");

    // Initialize configuration
    let config = match &args.config {
        Some(path) => {
            debug!(?path, "Using provided config file");
            Config::load(path)?
        }
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(path)?,
            None => Config::default(),
        },
    }
    .with_overrides(args.base_url.as_deref(), Config::env_base_url().as_deref());

    let base_url = config.resolve_base_url()?;
    info!(%base_url, "Using notes API");

    // Initialize infrastructure and application
    let transport = HttpTransport::new(&base_url)?;
    let mut store = NotesStore::new(transport);

    // Initialize presentation
    let presenter = TextPresenter::new();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    execute(args.command, &mut store, &presenter, stdin.lock(), stdout.lock()).await
}

/// Run one command against an already wired store.
///
/// The store is activated (initial load) before the command itself. The
/// exit code is a failure when the command leaves an error on the store.
pub async fn execute<T, R, W>(
    command: Command,
    store: &mut NotesStore<T>,
    presenter: &TextPresenter,
    input: R,
    mut output: W,
) -> Result<ExitCode>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Shell => {
            cli::shell::run_shell(store, presenter, input, output).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::List { json } => {
            store.activate().await;
            if json {
                match presenter.render_error(store.state()) {
                    Some(error) => writeln!(output, "{}", error)?,
                    None => {
                        let rendered = serde_json::to_string_pretty(&store.state().items)
                            .context("Failed to serialize notes")?;
                        writeln!(output, "{}", rendered)?;
                    }
                }
            } else {
                write!(output, "{}", presenter.render(store.state()))?;
            }
        }
        Command::Create { title, body } => {
            NewNote::new(&title, &body).context("Cannot create note")?;
            store.activate().await;
            info!(title = title.trim(), "Creating note");
            store.create_note(&title, &body).await;
            write!(output, "{}", presenter.render(store.state()))?;
        }
        Command::Delete { id } => {
            store.activate().await;
            info!(note_id = %id, "Deleting note");
            store.delete(&id).await;
            write!(output, "{}", presenter.render(store.state()))?;
        }
    }

    Ok(match store.state().error() {
        Some(_) => ExitCode::FAILURE,
        None => ExitCode::SUCCESS,
    })
}
