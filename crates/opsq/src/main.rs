//! opsq - deterministic cluster ops questions.
//!
//! Main entry point for the opsq CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{ask, route, serve};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// opsq - Ask operational questions about your cluster
#[derive(Parser)]
#[command(name = "opsq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory for JSON log files
    #[arg(long, global = true, env = "OPSQ_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Ask a one-shot question
    Ask(ask::AskArgs),

    /// Show which tool a question would invoke, without calling it
    Route(route::RouteArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "opsq=debug,opsq_router=debug,opsq_mcp=debug,opsq_llm=debug,opsq_engine=debug,opsq_server=debug,info"
    } else {
        "opsq=info,opsq_router=info,opsq_mcp=info,opsq_llm=info,opsq_engine=info,opsq_server=info,warn"
    };

    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "opsq.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "opsq=trace,opsq_router=trace,opsq_mcp=trace,opsq_llm=trace,opsq_engine=trace,opsq_server=trace,info",
                )),
        )
        .init();

    // Create context for commands
    let ctx = commands::Context {
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Serve(args) => serve::run(args, &ctx).await,
        Commands::Ask(args) => ask::run(args, &ctx).await,
        Commands::Route(args) => route::run(args, &ctx),
    }
}
