use std::io;

use anyhow::Context;
use clap::Parser;

use contrib_cli::app;
use contrib_cli::cli::Cli;
use contrib_cli::config::AppConfig;
use contrib_cli::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_overrides(&cli);
    logging::init_logging(&config.logging)?;

    let mut out = io::stdout().lock();
    app::run(&config, &cli.command, &mut out).await
}
