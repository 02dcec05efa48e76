//! User CLI subcommands.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum UserCommand {
    /// List registered users with their pronoun set.
    #[command(alias = "ls")]
    List,
}

pub async fn handle_user_command(cmd: UserCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        UserCommand::List => list_users(state, json).await,
    }
}

async fn list_users(state: &AppState, json: bool) -> Result<()> {
    let users = state.account_service.list_accounts().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!("  {} No users registered.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Email").fg(Color::White),
        Cell::new("Username").fg(Color::White),
        Cell::new("Pronouns").fg(Color::White),
        Cell::new("Joined").fg(Color::White),
    ]);

    for user in &users {
        let pronouns = match &user.pronoun_set {
            Some(set) => Cell::new(&set.name),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(&user.email).fg(Color::Cyan),
            Cell::new(&user.username),
            pronouns,
            Cell::new(user.created_at.format("%Y-%m-%d").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} user{}",
        style(users.len()).bold(),
        if users.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
