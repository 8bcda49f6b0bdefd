//! Serve command - runs the HTTP API server.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use console::Style;

use opsq_config::load_config;
use opsq_server::{Server, ServerConfig};

use super::Context;

/// Arguments for the serve command.
///
/// CLI arguments override config file values.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to config file (overrides default discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let mut addr = config.server.bind_addr()?;
    if let Some(ref bind) = args.bind {
        addr = bind
            .parse()
            .with_context(|| format!("invalid bind address '{}'", bind))?;
    }
    if let Some(port) = args.port {
        addr.set_port(port);
    }

    let dim = Style::new().dim();
    if ctx.verbose {
        println!("{}", dim.apply_to(format!("loki: {}", config.mcp.loki.url)));
        println!(
            "{}",
            dim.apply_to(format!("prometheus: {}", config.mcp.prometheus.url))
        );
        println!(
            "{}",
            dim.apply_to(format!(
                "summarizer: {} ({})",
                config.summarizer.url, config.summarizer.model
            ))
        );
    }

    let engine = super::build_engine(&config)?;
    let server = Server::new(engine, ServerConfig::new().with_bind_address(addr));

    let green = Style::new().green();
    println!(
        "{} opsq server on http://{}",
        green.apply_to("Starting"),
        addr
    );

    server.run().await?;
    Ok(())
}
