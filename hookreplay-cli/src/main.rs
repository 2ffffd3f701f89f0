use clap::Parser;
use hookreplay::{run_now, HookreplayError, RunOptions, RunSummary};
use hookreplay_github::{AppConfig, GithubAppClient};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Redeliver GitHub App webhook deliveries that failed in the last 3 hours.
///
/// Credentials are read from APP_ID and PRIVATE_KEY (or PRIVATE_KEY_PATH).
#[derive(Parser)]
#[command(name = "hookreplay", version)]
struct Cli {
    /// Report which deliveries would be redelivered without sending requests
    #[arg(long, env = "HOOKREPLAY_DRY_RUN")]
    dry_run: bool,
}

fn init_tracing() {
    // stdout is reserved for the run summary
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn execute(cli: &Cli) -> Result<RunSummary, HookreplayError> {
    let client = AppConfig::from_env()
        .and_then(|config| GithubAppClient::new(&config))
        .map_err(|e| {
            tracing::error!("Failed to set up GitHub client: {}", e);
            e
        })?;

    run_now(
        &client,
        RunOptions {
            dry_run: cli.dry_run,
        },
    )
    .await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match execute(&cli).await {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(message) = e.remote_message() {
                eprintln!("Failed to check and redeliver webhooks: {}", message);
            }
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
