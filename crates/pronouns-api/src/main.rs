//! Pronouns API server and admin CLI entry point.
//!
//! Binary name: `pronouns`
//!
//! Parses CLI arguments, loads configuration, initializes the database and
//! services, then either serves the REST API or runs an admin command.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use pronouns_infra::config::{load_config, resolve_data_dir};
use pronouns_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, Commands::Serve { .. });
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if serving => "info",
        0 => "warn",
        1 => "info,pronouns_api=debug,pronouns_core=debug,pronouns_infra=debug",
        _ => "trace",
    };
    let mut options = TracingOptions::new(filter);
    if let Commands::Serve { otel, log_json, .. } = &cli.command {
        options.otel = *otel;
        options.json = *log_json;
    }
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "pronouns", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let mut config = load_config(&data_dir).await;

    let result = match cli.command {
        Commands::Serve { port, host, .. } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::init(&config, data_dir).await?;
            serve(state, &config.server.host, config.server.port).await
        }
        Commands::Set { action } => {
            let state = AppState::init(&config, data_dir).await?;
            cli::pronoun_set::handle_set_command(action, &state, cli.json).await
        }
        Commands::User { action } => {
            let state = AppState::init(&config, data_dir).await?;
            cli::user::handle_user_command(action, &state, cli.json).await
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}

async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, data_dir = %state.data_dir.display(), "listening");

    println!(
        "  {} Pronouns API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
