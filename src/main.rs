use clap::Parser;
use dentit_api::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present so DATABASE_URL and friends can live next to the binary.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr; stdout may carry the readiness line. Installed before
    // the config is built so override warnings are not lost.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.environment().default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();

    if let Err(e) = dentit_api::server::run(&cli, config).await {
        tracing::error!("Failed to start web server: {:#}", e);
        std::process::exit(1);
    }
}
