//! drawppt - turn a sketch into a slide document, send it to the rendering
//! service, and download the exported presentation.
//!
//! This library exposes modules for use by the CLI and integration tests.

pub mod adapters;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod session;
pub mod traits;
