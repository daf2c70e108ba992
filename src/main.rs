//! Goal Unblocker server entry point

use clap::Parser;
use eyre::{Context, Result};
use tracing::{info, warn};

use unblock::cli::Cli;
use unblock::config::Config;
use unblock::server::{AppState, run_serve};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    // The endpoint reports a missing credential per request; at startup we
    // only warn so the page can still be served
    if config.llm.get_api_key().is_err() {
        warn!(
            env = %config.llm.api_key_env,
            "Provider API key not set; plan generation will fail until it is"
        );
    }

    let bind = cli.bind.clone().unwrap_or_else(|| config.server.bind.clone());
    let port = cli.port.unwrap_or(config.server.port);

    info!(provider = %config.llm.provider, model = %config.llm.model, "Starting unblock");
    run_serve(AppState::new(config), &bind, port).await
}
