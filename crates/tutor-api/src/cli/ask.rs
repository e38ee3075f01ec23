//! One-shot chat turn from the command line.

use anyhow::Result;
use console::style;

use tutor_types::chat::ChatRequest;

use crate::state::AppState;

/// Run a single chat turn for `user` through the same pipeline as
/// `POST /api/chat`.
///
/// # Examples
///
/// ```bash
/// tutor chat --user alice What is a stack?
/// ```
pub async fn ask(state: &AppState, user: &str, message: &str, json: bool) -> Result<()> {
    let reply = state
        .chat_service
        .handle_chat(ChatRequest::new(user, message))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("You:").cyan().bold(), message);
    println!();
    println!("  {} {}", style("Tutor:").green().bold(), reply.response);
    println!();

    Ok(())
}
