//! Chat session and its interactive REPL
//!
//! `ChatSession` keeps the history and replays it on every turn; `ReplSession`
//! drives one from the terminal with slash commands.

mod chat;
mod session;

pub use chat::ChatSession;
pub use session::ReplSession;

use colored::Colorize;
use eyre::Result;
use tracing::debug;

/// Ask each message in order, printing every reply
///
/// Stops at the first failed call.
pub async fn run_script(chat: &mut ChatSession, messages: &[String]) -> Result<()> {
    debug!(count = messages.len(), "run_script: called");
    for message in messages {
        println!("{} {}", ">".bright_green(), message);
        let reply = chat.ask(message).await?;
        println!("{}", reply);
        println!();
    }
    Ok(())
}

/// Run the interactive REPL
pub async fn run_interactive(chat: ChatSession) -> Result<()> {
    debug!("run_interactive: called");
    ReplSession::new(chat).run().await
}
