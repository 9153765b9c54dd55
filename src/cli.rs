use clap::Parser;

use crate::config::{AppConfig, Environment};

#[derive(Debug, Parser)]
#[command(name = "dentit-api")]
#[command(about = "Local web service for the Dentit desktop shell")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Listen port (overrides ELECTRON_WEB_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Run with development defaults (verbose logs, permissive CORS)")]
    pub dev: bool,

    #[arg(long, help = "Write the readiness message to stdout instead of the parent IPC channel")]
    pub notify_stdout: bool,

    #[arg(long, help = "Apply database migrations before serving")]
    pub migrate: bool,
}

impl Cli {
    /// Runtime environment, known before any other configuration is read.
    pub fn environment(&self) -> Environment {
        if self.dev {
            Environment::Development
        } else {
            Environment::from_env()
        }
    }

    /// Environment configuration with command-line flags applied on top.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::for_environment(self.environment())
            .with_env_overrides(|key| std::env::var(key).ok());

        if let Some(port) = self.port {
            config.server.port = port;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["dentit-api", "--port", "4000", "--dev", "--notify-stdout"]);
        assert_eq!(cli.port, Some(4000));
        assert!(cli.dev);
        assert!(cli.notify_stdout);
        assert!(!cli.migrate);
    }

    #[test]
    fn port_flag_wins_over_environment() {
        let cli = Cli::parse_from(["dentit-api", "--port", "4100"]);
        assert_eq!(cli.config().server.port, 4100);
    }

    #[test]
    fn dev_flag_selects_development() {
        let cli = Cli::parse_from(["dentit-api", "--dev"]);
        assert_eq!(cli.environment(), Environment::Development);
        assert_eq!(cli.config().environment, Environment::Development);
    }
}
