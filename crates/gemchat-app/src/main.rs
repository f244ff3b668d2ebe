mod boot;
mod cli;
mod controller;
mod render;
mod repl;

use std::process::ExitCode;

use chrono::Local;
use cli::Command;
use controller::{ChatController, SendOutcome};
use gemchat_common::GemchatError;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file before anything reads the environment
    boot::load_dotenv();

    let args = cli::parse();
    let logging = boot::init_logging(args.log_level.as_deref());
    let config = boot::load_config(args.config.as_deref());
    logging.apply_config_level(config.logging.level);

    tracing::info!("gemchat v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }

    match run(args.command.unwrap_or(Command::Chat), &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    command: Command,
    config: &gemchat_config::GemchatConfig,
) -> Result<ExitCode, GemchatError> {
    let store = boot::open_store(config)?;
    let client = boot::build_client(config)?;
    let mut controller = ChatController::new(store, client);

    let code = match command {
        Command::Chat => {
            repl::run(&mut controller, boot::export_dir(config, None)).await?;
            ExitCode::SUCCESS
        }
        Command::New => {
            println!("{}", controller.new_session());
            ExitCode::SUCCESS
        }
        Command::List => {
            let store = controller.store();
            if store.sessions().is_empty() {
                println!("No chats yet.");
            }
            for line in render::session_list(store.sessions(), store.active_id(), Local::now()) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Command::Switch { id } => match controller.resolve(&id) {
            Some(session_id) if controller.switch(&session_id) => {
                println!("Active chat is now {session_id}");
                ExitCode::SUCCESS
            }
            _ => not_found(&id),
        },
        Command::Send { text } => {
            controller.ensure_session();
            match controller.send(&text.join(" ")).await {
                SendOutcome::Replied(message) => {
                    println!("{}", message.content);
                    ExitCode::SUCCESS
                }
                SendOutcome::Failed { error, .. } => {
                    eprintln!("error: {error}");
                    ExitCode::FAILURE
                }
                SendOutcome::Ignored | SendOutcome::Busy => {
                    eprintln!("nothing to send");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Show { id } => {
            let target = match id {
                Some(id) => controller.resolve(&id),
                None => controller.store().active_id().cloned(),
            };
            match target.as_ref().and_then(|id| controller.store().session(id)) {
                Some(session) => {
                    print!("{}", render::transcript(session, Local::now()));
                    ExitCode::SUCCESS
                }
                None => {
                    eprintln!("no chat to show");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Rename { id, title } => match controller.resolve(&id) {
            Some(session_id) => {
                if controller.rename(&session_id, &title.join(" ")) {
                    println!("Renamed {session_id}");
                } else {
                    println!("Title unchanged");
                }
                ExitCode::SUCCESS
            }
            None => not_found(&id),
        },
        Command::Delete { id } => match controller.resolve(&id) {
            Some(session_id) if controller.delete(&session_id) => {
                println!("Deleted {session_id}");
                ExitCode::SUCCESS
            }
            _ => not_found(&id),
        },
        Command::Export { id, out } => match controller.resolve(&id) {
            Some(session_id) => {
                let dir = boot::export_dir(config, out);
                let path = controller.export(&session_id, &dir)?;
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            None => not_found(&id),
        },
    };

    if let Some(reason) = controller.store().last_persist_error() {
        eprintln!("warning: chats could not be saved: {reason}");
        return Ok(ExitCode::FAILURE);
    }
    Ok(code)
}

fn not_found(id: &str) -> ExitCode {
    eprintln!("no chat matches '{id}'");
    ExitCode::FAILURE
}
