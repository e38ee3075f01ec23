//! History CLI commands: show and clear.

use anyhow::Result;
use chrono::{Local, TimeZone};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use crate::state::AppState;

/// Longest message preview shown in the history table.
const PREVIEW_CHARS: usize = 60;

/// Print a user's history as a table (or JSON array with `--json`).
pub async fn show_history(state: &AppState, user: &str, json: bool) -> Result<()> {
    let history = state.chat_service.get_history_for_user(user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!();
        println!(
            "  {} No history for '{}'. Start one with: {}",
            style("i").blue().bold(),
            style(user).cyan(),
            style(format!("tutor chat --user {user} <question>")).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("When").fg(Color::White),
        Cell::new("Question").fg(Color::White),
        Cell::new("Answer").fg(Color::White),
    ]);

    for (index, record) in history.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).fg(Color::DarkGrey),
            Cell::new(format_timestamp(record.timestamp)).fg(Color::White),
            Cell::new(preview(&record.user_message)).fg(Color::Cyan),
            Cell::new(preview(&record.ai_response)).fg(Color::Green),
        ]);
    }

    println!();
    println!("  History for '{}'", style(user).cyan().bold());
    println!();
    println!("{table}");
    println!();
    println!(
        "  {} interaction{}",
        style(history.len()).bold(),
        if history.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Clear a user's history, asking for confirmation unless `yes` is set.
pub async fn clear_history(state: &AppState, user: &str, yes: bool, json: bool) -> Result<()> {
    if !yes && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Clear all history for '{}'?", style(user).red().bold()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.chat_service.clear_history_for_user(user).await?;

    if json {
        println!("{}", serde_json::json!({ "success": true }));
    } else {
        println!();
        println!(
            "  {} Cleared history for '{}'",
            style("✓").green().bold(),
            style(user).cyan()
        );
        println!();
    }

    Ok(())
}

fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}
