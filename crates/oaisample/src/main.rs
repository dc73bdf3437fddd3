use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use oaisample::cli::{Cli, dispatch};
use oaisample::commands::Outcome;
use oaisample::config::Config;
use oaisample::console::StdConsole;
use oaisample_client::OpenAiClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .await
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    let client = OpenAiClient::new(config.client_config()?)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let mut console = StdConsole::new();
    let outcome = dispatch(cli.command, &client, &config, &mut console, &cancel).await;

    Ok(match outcome {
        Outcome::Succeeded => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}
