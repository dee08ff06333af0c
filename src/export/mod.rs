//! Export orchestration and artifact storage.

pub mod artifact;
pub mod orchestrator;

pub use artifact::{remove_partials, ExportedArtifact};
pub use orchestrator::ExportOrchestrator;
