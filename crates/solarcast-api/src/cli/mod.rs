//! CLI command definitions for the `solarcast` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod forecast;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Solar generation forecasts with an AI assistant.
#[derive(Parser)]
#[command(name = "solarcast", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file (default: ./solarcast.toml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long, env = "SOLARCAST_PORT")]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long, env = "SOLARCAST_HOST")]
        host: Option<String>,
    },

    /// Generate a forecast and print the latest rows with a summary.
    Forecast {
        /// Forecast horizon in days.
        #[arg(short, long, allow_hyphen_values = true)]
        days: Option<i64>,
    },

    /// Ask the assistant a question about the forecast.
    Ask {
        /// The question to ask.
        question: String,

        /// Generate a forecast of this many days first.
        #[arg(short, long, allow_hyphen_values = true)]
        days: Option<i64>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Tracing filter for the given verbosity flags.
pub fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn,solarcast=info,tower_http=info",
        1 => "info,solarcast=debug,tower_http=debug",
        _ => "trace",
    }
}
