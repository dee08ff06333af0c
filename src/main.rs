use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use drawppt::cli::{run_cli_command, Cli};

/// Logs go to stderr so stdout only carries status lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Usage errors exit with code 2; --version and --help exit with 0.
    let cli = Cli::parse();

    init_tracing();

    if let Err(e) = run_cli_command(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
