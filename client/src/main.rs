use std::error::Error;

use clap::Parser;
use forum_client::{app::App, config::ClientConfig, shell::Shell, states::ClientState};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Terminal client for the forum.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Backend base URL (overrides FORUM_API_URL).
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = args.api_url.as_deref() {
        config = config.with_api_url(api_url)?;
    }

    // Initialize logging; stdout belongs to the shell
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let state = ClientState::connect(&config.api_url)?;
    info!("Using forum backend at {}", config.api_url);

    let mut shell = Shell::new(
        App::new(state),
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );
    shell.run().await?;

    Ok(())
}
