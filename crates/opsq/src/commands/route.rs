//! Route command - dry-run the deterministic router.
//!
//! Classifies a question without contacting any tool server. Useful for
//! checking what a question would do before asking it for real.

use anyhow::Result;
use clap::Args;
use console::Style;

use opsq_router::QuestionRouter;

use super::Context;

/// Arguments for the route command.
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// The question to classify
    #[arg(required = true)]
    pub question: String,
}

/// Run the route command.
pub fn run(args: RouteArgs, ctx: &Context) -> Result<()> {
    let router = QuestionRouter::new();
    let request = router.route(&args.question)?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let bold = Style::new().bold();
    println!("{}", bold.apply_to(request.route_label()));
    for (key, value) in &request.arguments {
        println!("  {}: {}", key, value);
    }
    Ok(())
}
