//! Client configuration.
//!
//! Defaults target a backend on the local machine and a scratch directory
//! under the system temp dir. The CLI layers environment variables and flags
//! over them.

use std::path::PathBuf;

/// Default backend address (the development server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable read by `--base-url`.
pub const BASE_URL_ENV: &str = "DRAWPPT_BASE_URL";

/// Environment variable read by `--export-dir`.
pub const EXPORT_DIR_ENV: &str = "DRAWPPT_EXPORT_DIR";

const EXPORT_DIR_NAME: &str = "drawppt-exports";

/// Configuration for the backend client and export storage.
///
/// # Example
///
/// ```
/// use drawppt::config::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_base_url("http://192.168.1.20:8000");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the rendering service, without a trailing slash
    pub base_url: String,
    /// Directory downloaded artifacts are written to
    pub export_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            export_dir: default_export_dir(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(url.into());
        self
    }

    /// Set the artifact directory.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }
}

/// `<system temp dir>/drawppt-exports`.
pub fn default_export_dir() -> PathBuf {
    std::env::temp_dir().join(EXPORT_DIR_NAME)
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
