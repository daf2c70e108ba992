//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// Goal Unblocker server
#[derive(Debug, Parser)]
#[command(
    name = "unblock",
    about = "Serves barrier-aware action plans generated by a hosted LLM",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Bind address (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Listen port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["unblock"]);
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(cli.bind.is_none());
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from(["unblock", "--bind", "0.0.0.0", "--port", "8080", "-l", "debug"]);
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
