//! CLI command definitions for the `pronouns` binary.
//!
//! `serve` runs the REST API; the remaining commands operate on the same
//! database directly for local administration.

pub mod pronoun_set;
pub mod user;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Pronouns API server and admin tool.
#[derive(Parser)]
#[command(name = "pronouns", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config and PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config and HOST).
        #[arg(long)]
        host: Option<String>,

        /// Export spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,

        /// Emit logs as JSON lines.
        #[arg(long)]
        log_json: bool,
    },

    /// Manage pronoun sets.
    Set {
        #[command(subcommand)]
        action: pronoun_set::SetCommand,
    },

    /// Inspect registered users.
    User {
        #[command(subcommand)]
        action: user::UserCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
