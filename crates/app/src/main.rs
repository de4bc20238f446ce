mod cli;
mod commands;
mod config;
mod error;
mod export;
mod prompt;
mod render;

use clap::Parser;

use crate::{cli::Cli, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expensa={level},client={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = commands::run(cli.command, &settings).await {
        tracing::debug!("command failed: {err:?}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    Ok(())
}
