//! Interactive line loop over the active session.

use std::path::PathBuf;

use chrono::Local;
use gemchat_common::GemchatError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::controller::{ChatController, SendOutcome};
use crate::render;

const HELP: &str = "\
Commands:
  /new              start a new chat
  /list             list chats
  /switch <id>      switch to a chat (id or unique prefix)
  /show             reprint the current chat
  /rename <title>   rename the current chat
  /delete           delete the current chat
  /export [dir]     export the current chat as JSON
  /help             show this help
  /quit             leave";

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Message(String),
    New,
    List,
    Switch(String),
    Show,
    Rename(String),
    Delete,
    Export(Option<PathBuf>),
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Message(line.to_string());
    };
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "new" => ReplCommand::New,
        "list" | "ls" => ReplCommand::List,
        "switch" if !rest.is_empty() => ReplCommand::Switch(rest.to_string()),
        "show" => ReplCommand::Show,
        "rename" if !rest.is_empty() => ReplCommand::Rename(rest.to_string()),
        "delete" => ReplCommand::Delete,
        "export" => ReplCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

/// Run until `/quit` or end of input.
pub async fn run(
    controller: &mut ChatController,
    export_dir: PathBuf,
) -> Result<(), GemchatError> {
    let mut rl = DefaultEditor::new().map_err(|e| GemchatError::Other(e.to_string()))?;
    controller.ensure_session();
    if let Some(session) = controller.store().active_session() {
        print!("{}", render::transcript(session, Local::now()));
    }
    println!("Type a message, or /help for commands.");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("failed to read input: {e}");
                break;
            }
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match parse_line(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Message(text) => {
                println!("Gemini is thinking...");
                match controller.send(&text).await {
                    SendOutcome::Replied(message) | SendOutcome::Failed { message, .. } => {
                        println!("{}\n", render::message_line(&message, Local::now()));
                    }
                    SendOutcome::Busy => println!("Still waiting on the previous reply."),
                    SendOutcome::Ignored => debug!("input ignored"),
                }
            }
            ReplCommand::New => {
                let id = controller.new_session();
                println!("Started new chat {id}");
            }
            ReplCommand::List => {
                let store = controller.store();
                let lines = render::session_list(store.sessions(), store.active_id(), Local::now());
                for line in lines {
                    println!("{line}");
                }
            }
            ReplCommand::Switch(target) => match controller.resolve(&target) {
                Some(id) if controller.switch(&id) => {
                    if let Some(session) = controller.store().active_session() {
                        print!("{}", render::transcript(session, Local::now()));
                    }
                }
                _ => println!("No chat matches '{target}'."),
            },
            ReplCommand::Show => {
                if let Some(session) = controller.store().active_session() {
                    print!("{}", render::transcript(session, Local::now()));
                }
            }
            ReplCommand::Rename(title) => {
                if let Some(id) = controller.store().active_id().cloned() {
                    if controller.rename(&id, &title) {
                        println!("Renamed to '{}'.", title.trim());
                    }
                }
            }
            ReplCommand::Delete => {
                if let Some(id) = controller.store().active_id().cloned() {
                    controller.delete(&id);
                    if let Some(session) = controller.store().active_session() {
                        println!("Deleted. Now in '{}'.", session.title);
                    }
                }
            }
            ReplCommand::Export(dir) => {
                let dir = dir.unwrap_or_else(|| export_dir.clone());
                if let Some(id) = controller.store().active_id().cloned() {
                    match controller.export(&id, &dir) {
                        Ok(path) => println!("Exported to {}", path.display()),
                        Err(e) => println!("Export failed: {e}"),
                    }
                }
            }
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Unknown(input) => println!("Unknown command '{input}'. Try /help."),
        }

        if let Some(reason) = controller.store().last_persist_error() {
            eprintln!("warning: chats could not be saved: {reason}");
        }
    }
    Ok(())
}
