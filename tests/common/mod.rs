//! Common test utilities for integration tests.
//!
//! Fixtures for a wiremock-backed rendering service and a session wired to it.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use drawppt::adapters::ReqwestHttpClient;
use drawppt::backend::BackendClient;
use drawppt::export::ExportOrchestrator;
use drawppt::models::{build_document, DrawingBounds, FrameDocument};
use drawppt::session::SessionController;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PROJECT_ID: &str = "demo";

/// Bytes standing in for a pptx file.
pub const PPTX_BYTES: &[u8] = b"PK\x03\x04drawppt-test-deck";

pub fn demo_document() -> FrameDocument {
    build_document(PROJECT_ID, DrawingBounds::empty())
}

pub fn backend_for(server: &MockServer) -> Arc<BackendClient<ReqwestHttpClient>> {
    Arc::new(BackendClient::with_base_url(server.uri()))
}

pub fn orchestrator_for(server: &MockServer, dir: &Path) -> ExportOrchestrator<ReqwestHttpClient> {
    ExportOrchestrator::new(backend_for(server), dir)
}

pub fn session_for(server: &MockServer, dir: &Path) -> SessionController<ReqwestHttpClient> {
    SessionController::new(Arc::new(orchestrator_for(server, dir)), PROJECT_ID)
}

pub fn generate_path(project_id: &str) -> String {
    format!("/v1/projects/{}/generate", project_id)
}

pub fn export_path(project_id: &str) -> String {
    format!("/v1/projects/{}/export/pptx", project_id)
}

pub fn download_path(export_id: &str) -> String {
    format!("/v1/exports/{}", export_id)
}

/// Export endpoint answering with `export_id`.
pub async fn mount_export(server: &MockServer, project_id: &str, export_id: &str) {
    Mock::given(method("POST"))
        .and(path(export_path(project_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "exportId": export_id,
            "download": download_path(export_id),
        })))
        .mount(server)
        .await;
}

/// Download endpoint serving `body` for `export_id`.
pub async fn mount_download(server: &MockServer, export_id: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(download_path(export_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "content-type",
                    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                )
                .set_body_bytes(body.to_vec()),
        )
        .mount(server)
        .await;
}

/// Names of the files in `dir`, sorted.
pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
