//! Solarcast CLI and HTTP API entry point.
//!
//! Binary name: `solarcast`
//!
//! Loads `.env`, parses CLI arguments, reads configuration, loads the model
//! and dispatches to the command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use solarcast_infra::config::load_config;
use solarcast_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(cli::log_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "solarcast", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref()).await?;
    tracing::debug!(?config, "configuration loaded");

    if let Commands::Serve { port, host } = &cli.command {
        if let Some(port) = port {
            config.server.port = *port;
        }
        if let Some(host) = host {
            config.server.host = host.clone();
        }
    }

    let state = AppState::init(config).await?;

    match cli.command {
        Commands::Serve { .. } => serve(state, cli.quiet).await?,

        Commands::Forecast { days } => {
            cli::forecast::forecast(&state, days, cli.json).await?;
        }

        Commands::Ask { question, days } => {
            cli::ask::ask(&state, &question, days, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

async fn serve(state: AppState, quiet: bool) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        %addr,
        chat_provider = state.chat_service.gateway().provider_name(),
        "server listening"
    );
    if !quiet {
        println!(
            "  {} Solarcast API listening on {}",
            console::style("☀").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
