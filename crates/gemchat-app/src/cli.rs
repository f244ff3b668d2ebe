use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// gemchat: a terminal chat client for the Gemini API with persistent sessions.
#[derive(Parser, Debug)]
#[command(name = "gemchat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive chat in the active session (default).
    Chat,
    /// Start a new session and make it active.
    New,
    /// List sessions, newest first.
    List,
    /// Make a session active.
    Switch {
        /// Session id or unique id prefix.
        id: String,
    },
    /// Send one message to the active session and print the reply.
    Send {
        /// Message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print a session's messages.
    Show {
        /// Session id or unique prefix; defaults to the active session.
        id: Option<String>,
    },
    /// Rename a session.
    Rename {
        id: String,
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Delete a session.
    Delete { id: String },
    /// Write a session to `chat-<id>.json`.
    Export {
        id: String,
        /// Output directory (defaults to `storage.export_dir` or the working directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
