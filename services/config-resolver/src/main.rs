//! piper-config - Main Entry Point
//!
//! Resolves a step configuration and prints it as JSON.

use anyhow::Result;
use clap::Parser;
use pipeline_common::{TracingConfig, init_tracing};
use piper_config::{Cli, resolve};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let tracing_config = TracingConfig::default()
        .with_step_name("piper-config")
        .with_verbose(cli.verbose)
        .with_json_output(cli.json_logs);
    init_tracing(&tracing_config)?;

    let resolution = resolve(&cli).await?;
    println!("{}", serde_json::to_string_pretty(&resolution.render(cli.show_secrets))?);

    info!(step = %resolution.step_name, "SUCCESS");
    Ok(())
}
