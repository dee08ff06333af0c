//! CLI module for drawppt.
//!
//! Parses arguments into a [`Cli`] and runs its command against the backend.
//! The CLI stands in for the drawing surface: `--width`/`--height` give the
//! bounds of the drawing.
//!
//! # Usage
//!
//! ```ignore
//! use clap::Parser;
//! use drawppt::cli::{run_cli_command, Cli};
//!
//! run_cli_command(Cli::parse()).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{Cli, Command, DrawingArgs, ExportArgs};
pub use version::VERSION;

use std::sync::Arc;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing::info;

use crate::backend::BackendClient;
use crate::config::ClientConfig;
use crate::export::ExportOrchestrator;
use crate::session::{SessionController, Trigger};

/// Run the parsed command.
pub async fn run_cli_command(cli: Cli) -> Result<()> {
    let config = cli.config();

    match cli.command {
        Command::Health => {
            let backend = BackendClient::from_config(&config);

            if backend.health_check().await? {
                println!("Backend at {} is healthy", backend.base_url);
                Ok(())
            } else {
                Err(eyre!("Backend at {} is not healthy", backend.base_url))
            }
        }
        Command::Upload(drawing) => {
            let controller = session_for(&config, &drawing);
            let trigger = controller.start_upload().await;
            println!("{}", controller.status_text());
            finish(trigger)
        }
        Command::Export(export) => {
            let controller = session_for(&config, &export.drawing);

            let stale = controller.exporter().remove_partials().await?;
            if stale > 0 {
                info!(count = stale, "Removed stale partial downloads");
            }

            let trigger = controller.start_export().await;
            println!("{}", controller.status_text());
            let artifact = finish(trigger)?;
            println!("{}", artifact.path.display());

            if export.open {
                open::that(&artifact.path)
                    .wrap_err_with(|| format!("Could not open {}", artifact.path.display()))?;
            }
            Ok(())
        }
    }
}

fn session_for(config: &ClientConfig, drawing: &DrawingArgs) -> SessionController {
    let exporter = Arc::new(ExportOrchestrator::from_config(config));

    let controller = SessionController::new(exporter, drawing.project_id.clone());
    controller.update_bounds(drawing.bounds());
    controller
}
fn finish<T>(trigger: Trigger<T>) -> Result<T> {
    match trigger {
        Trigger::Succeeded(value) => Ok(value),
        Trigger::Rejected(reason) => Err(eyre!("Nothing was sent: {}", reason)),
        Trigger::Failed(err) => Err(err.into()),
    }
}
