//! Request an export and fetch the resulting presentation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::artifact::{self, ExportedArtifact};
use crate::adapters::ReqwestHttpClient;
use crate::backend::BackendClient;
use crate::config::ClientConfig;
use crate::error::{BackendError, BackendResult};
use crate::models::FrameDocument;
use crate::traits::HttpClient;

/// Runs the export request, download, and local save as one operation.
///
/// Either a complete `<exportId>.pptx` ends up in the export directory or the
/// directory is left as it was.
#[derive(Debug)]
pub struct ExportOrchestrator<C = ReqwestHttpClient> {
    backend: Arc<BackendClient<C>>,
    export_dir: PathBuf,
}

impl ExportOrchestrator<ReqwestHttpClient> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            Arc::new(BackendClient::from_config(config)),
            config.export_dir.clone(),
        )
    }
}

impl<C: HttpClient> ExportOrchestrator<C> {
    pub fn new(backend: Arc<BackendClient<C>>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            export_dir: export_dir.into(),
        }
    }

    pub fn backend(&self) -> &BackendClient<C> {
        &self.backend
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Where the artifact for `export_id` is saved.
    pub fn artifact_path(&self, export_id: &str) -> PathBuf {
        self.export_dir.join(artifact::artifact_file_name(export_id))
    }

    /// Request a pptx for `document`, download it, and save it.
    ///
    /// Stops at the first failure and returns its error. A download that
    /// fails partway leaves no file behind and keeps any earlier artifact
    /// with the same id.
    pub async fn export_and_fetch(
        &self,
        project_id: &str,
        document: &FrameDocument,
    ) -> BackendResult<ExportedArtifact> {
        let handle = self.backend.request_export(project_id, document).await?;

        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .map_err(|e| BackendError::file_system(&self.export_dir, e))?;

        let stream = self.backend.download_artifact(&handle.export_id).await?;
        let path = self.artifact_path(&handle.export_id);
        let size = artifact::persist_stream(stream, &path).await?;

        info!(
            project_id = %project_id,
            export_id = %handle.export_id,
            path = %path.display(),
            bytes = size,
            "Export saved"
        );

        Ok(ExportedArtifact {
            export_id: handle.export_id,
            download_ref: handle.download_ref,
            path,
            size,
        })
    }

    /// Delete partial downloads left in the export directory.
    pub async fn remove_partials(&self) -> BackendResult<usize> {
        artifact::remove_partials(&self.export_dir).await
    }
}
