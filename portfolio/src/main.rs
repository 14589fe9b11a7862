//! Portfolio backend entry point.

mod config;

use clap::Parser;
use config::Config;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(about = "Backend gateway for the portfolio site")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    shared::logging::init(&config.logging.filter);

    tracing::info!(
        host = %config.gateway.listener.host,
        port = config.gateway.listener.port,
        "starting gateway"
    );

    if let Err(error) = gateway::run(config.gateway).await {
        tracing::error!(%error, "gateway exited");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
