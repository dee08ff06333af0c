//! Command-line arguments for the drawppt CLI.
//!
//! ```text
//! drawppt [--base-url URL] [--export-dir DIR] <upload|export|health>
//!         [--project ID] [--width W] [--height H] [--open]
//! drawppt --version
//! ```
//!
//! Usage errors exit with code 2, the way clap reports them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::version::VERSION;
use crate::config::{default_export_dir, ClientConfig, DEFAULT_BASE_URL};
use crate::models::DrawingBounds;

/// Project used when `--project` is not given.
pub const DEFAULT_PROJECT_ID: &str = "demo";

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "drawppt",
    version = VERSION,
    about = "Turn a wireframe sketch into a generated slide deck"
)]
pub struct Cli {
    /// Backend address
    #[arg(long, global = true, env = "DRAWPPT_BASE_URL")]
    pub base_url: Option<String>,

    /// Where exported files go
    #[arg(long, global = true, env = "DRAWPPT_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit the drawing for generation
    Upload(DrawingArgs),
    /// Export the drawing to pptx and save it locally
    Export(ExportArgs),
    /// Check that the backend is reachable
    Health,
}

/// The drawing the CLI stands in for: a project and the sketch bounds.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct DrawingArgs {
    /// Project id
    #[arg(long = "project", default_value = DEFAULT_PROJECT_ID)]
    pub project_id: String,

    /// Drawing width in device units
    #[arg(long, default_value_t = 0.0, value_parser = parse_extent)]
    pub width: f64,

    /// Drawing height in device units
    #[arg(long, default_value_t = 0.0, value_parser = parse_extent)]
    pub height: f64,
}

impl DrawingArgs {
    pub fn bounds(&self) -> DrawingBounds {
        DrawingBounds::new(self.width, self.height)
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ExportArgs {
    #[command(flatten)]
    pub drawing: DrawingArgs,

    /// Open the exported file when done
    #[arg(long)]
    pub open: bool,
}

impl Cli {
    /// Client configuration from flags and environment.
    ///
    /// Blank values fall back to the defaults.
    pub fn config(&self) -> ClientConfig {
        let base_url = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);

        let export_dir = self
            .export_dir
            .clone()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(default_export_dir);

        ClientConfig::new()
            .with_base_url(base_url)
            .with_export_dir(export_dir)
    }
}

/// Drawing extents are non-negative finite numbers.
fn parse_extent(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => Ok(number),
        Ok(_) => Err(format!("{} is not a non-negative finite number", value)),
        Err(e) => Err(e.to_string()),
    }
}
