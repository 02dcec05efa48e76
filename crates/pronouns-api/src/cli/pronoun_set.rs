//! Pronoun set CLI subcommands: create, list, delete.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use pronouns_types::id::PronounSetId;
use pronouns_types::pronoun::CreatePronounSetRequest;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum SetCommand {
    /// Create a pronoun set.
    Create {
        /// Set name, e.g. "they/them".
        name: String,
    },

    /// List all pronoun sets.
    #[command(alias = "ls")]
    List,

    /// Delete a pronoun set and its pronouns.
    #[command(alias = "rm")]
    Delete {
        /// Set id.
        id: String,
    },
}

/// Handle a set subcommand.
pub async fn handle_set_command(cmd: SetCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        SetCommand::Create { name } => create_set(state, name, json).await,
        SetCommand::List => list_sets(state, json).await,
        SetCommand::Delete { id } => delete_set(state, &id, json).await,
    }
}

async fn create_set(state: &AppState, name: String, json: bool) -> Result<()> {
    let set = state
        .pronoun_set_service
        .create_set(CreatePronounSetRequest { name: Some(name) })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        println!(
            "  {} Created set '{}' ({})",
            style("✓").green().bold(),
            style(&set.name).bold(),
            style(set.id).dim()
        );
    }

    Ok(())
}

async fn list_sets(state: &AppState, json: bool) -> Result<()> {
    let sets = state.pronoun_set_service.list_sets().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sets)?);
        return Ok(());
    }

    if sets.is_empty() {
        println!();
        println!(
            "  {} No pronoun sets yet. Add one with: {}",
            style("i").blue().bold(),
            style("pronouns set create they/them").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for set in &sets {
        table.add_row(vec![
            Cell::new(&set.name).fg(Color::Cyan),
            Cell::new(set.id.to_string()),
            Cell::new(set.created_at.format("%Y-%m-%d").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} set{}",
        style(sets.len()).bold(),
        if sets.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

async fn delete_set(state: &AppState, id: &str, json: bool) -> Result<()> {
    let set_id: PronounSetId = id
        .parse()
        .with_context(|| format!("'{id}' is not a valid set id"))?;

    state.pronoun_set_service.delete_set(&set_id).await?;

    if json {
        println!("{}", serde_json::json!({ "deleted": true, "id": set_id }));
    } else {
        println!("  {} Deleted set {}", style("✓").green().bold(), set_id);
    }

    Ok(())
}
