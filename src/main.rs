use anyhow::anyhow;
use clap::Parser;
use portsweep::cli::{self, Cli};
use portsweep::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = cli.settings();
    init_tracing(cli.verbose(&settings))?;

    let result = cli.run(&settings).await;
    if let Err(e) = &result {
        output::print_error(&e.to_string());
    }
    Ok(ExitCode::from(cli::exit_status(&result)))
}

/// Log to stderr, filtered by `RUST_LOG` or [`cli::log_filter`].
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli::log_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
