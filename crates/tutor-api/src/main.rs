//! Tutor CLI and HTTP API entry point.
//!
//! Binary name: `tutor`
//!
//! Parses CLI arguments, loads configuration, wires the chat service, then
//! dispatches to a command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use tutor_infra::config::{load_config, resolve_data_dir};
use tutor_observe::tracing_setup::{init_tracing, shutdown_tracing};
use tutor_types::config::TutorConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "tutor", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = load_config(&data_dir).await;

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if matches!(cli.command, Commands::Serve { .. }) => "info",
        0 => "warn",
        1 => "info,tutor_core=debug,tutor_infra=debug,tutor_api=debug",
        _ => "trace",
    };
    init_tracing(filter, config.logging.format, config.logging.otel)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize tracing")?;

    let result = run(cli, data_dir, config).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, data_dir: std::path::PathBuf, config: TutorConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            host,
            port,
            ephemeral,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::init(data_dir, config, ephemeral).await?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            tracing::info!(
                %addr,
                store = state.store.kind(),
                provider = state.chat_service.provider_name(),
                model = state.chat_service.model(),
                data_dir = %state.data_dir.display(),
                "tutor API listening"
            );
            if !cli.quiet {
                println!(
                    "  {} Tutor API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state.clone());
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            state.store.close().await;
            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Chat { user, message } => {
            let state = AppState::init(data_dir, config, false).await?;
            cli::ask::ask(&state, &user, &message.join(" "), cli.json).await?;
            state.store.close().await;
        }

        Commands::History { user } => {
            let state = AppState::init(data_dir, config, false).await?;
            cli::session::show_history(&state, &user, cli.json).await?;
            state.store.close().await;
        }

        Commands::Clear { user, yes } => {
            let state = AppState::init(data_dir, config, false).await?;
            cli::session::clear_history(&state, &user, yes, cli.json).await?;
            state.store.close().await;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
