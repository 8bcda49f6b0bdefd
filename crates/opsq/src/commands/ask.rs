//! Ask command - one-shot question answered in-process.
//!
//! Builds the engine from configuration and calls the tool servers
//! directly, without going through a running HTTP server.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::Style;

use opsq_config::load_config;

use super::Context;

/// Arguments for the ask command.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(required = true)]
    pub question: String,

    /// Print the raw tool output instead of the summary
    #[arg(long)]
    pub raw: bool,

    /// Path to config file (overrides default discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the ask command.
pub async fn run(args: AskArgs, ctx: &Context) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let engine = super::build_engine(&config)?;

    let dim = Style::new().dim();
    if ctx.verbose {
        println!("{}", dim.apply_to(format!("question: {}", args.question)));
    }

    let answer = engine.ask(&args.question).await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    println!("{}", dim.apply_to(answer.route.as_str()));
    if args.raw {
        println!("{}", answer.raw_result);
    } else {
        println!("{}", answer.summary);
    }
    Ok(())
}
