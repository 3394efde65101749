// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Base address of the notes API (overrides config file and NOTES_API_BASE_URL)
    #[arg(short = 'u', long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all notes
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Create {
        /// Note title
        #[arg(short, long)]
        title: String,

        /// Note body
        #[arg(short, long)]
        body: String,
    },

    /// Delete a note by ID
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        id: String,
    },

    /// Interactive session
    Shell,
}
