//! Rendering service API client.
//!
//! Three independent exchanges make up an export cycle: submit a document
//! for generation, request a pptx export, download the artifact. Each one
//! validates the status, decodes what it needs, and maps every failure onto
//! [`BackendError`]. Nothing here retries.

use serde::de::Error as _;
use tracing::{debug, info, warn};

use crate::adapters::ReqwestHttpClient;
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{BackendError, BackendResult, Operation};
use crate::models::{ExportHandle, FrameDocument, HealthResponse};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// Client for the rendering service.
///
/// Generic over the transport so tests can substitute
/// [`MockHttpClient`](crate::adapters::MockHttpClient).
#[derive(Debug, Clone)]
pub struct BackendClient<C = ReqwestHttpClient> {
    /// Base URL for the API, without a trailing slash
    pub base_url: String,
    http: C,
}

impl BackendClient<ReqwestHttpClient> {
    /// Client for the default development backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client for a custom base URL using reqwest.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, ReqwestHttpClient::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_base_url(config.base_url.clone())
    }
}

impl Default for BackendClient<ReqwestHttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> BackendClient<C> {
    /// Client over an arbitrary transport.
    pub fn with_http_client(base_url: impl Into<String>, http: C) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// The underlying transport.
    pub fn http(&self) -> &C {
        &self.http
    }

    /// `POST /v1/projects/{projectId}/generate`
    pub fn generate_url(&self, project_id: &str) -> String {
        format!("{}/v1/projects/{}/generate", self.base_url, segment(project_id))
    }

    /// `POST /v1/projects/{projectId}/export/pptx`
    pub fn export_url(&self, project_id: &str) -> String {
        format!("{}/v1/projects/{}/export/pptx", self.base_url, segment(project_id))
    }

    /// `GET /v1/exports/{exportId}`
    pub fn download_url(&self, export_id: &str) -> String {
        format!("{}/v1/exports/{}", self.base_url, segment(export_id))
    }

    /// `GET /health`
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// Submit a document for generation.
    ///
    /// The response body carries nothing the client needs and is ignored.
    pub async fn submit_for_generation(
        &self,
        project_id: &str,
        document: &FrameDocument,
    ) -> BackendResult<()> {
        let url = self.generate_url(project_id);
        self.post_document(Operation::Submit, &url, document).await?;

        info!(
            project_id = %project_id,
            pages = document.page_count(),
            "Document submitted for generation"
        );
        Ok(())
    }

    /// Ask the service to render a pptx for `document`.
    ///
    /// Returns [`BackendError::DecodeFailed`] when the body is not an
    /// `{exportId, download}` object or the export id cannot name a local file.
    pub async fn request_export(
        &self,
        project_id: &str,
        document: &FrameDocument,
    ) -> BackendResult<ExportHandle> {
        let url = self.export_url(project_id);
        let response = self
            .post_document(Operation::RequestExport, &url, document)
            .await?;

        let handle: ExportHandle = response
            .json()
            .map_err(|e| BackendError::decode(Operation::RequestExport, e))?;

        if !handle.has_safe_id() {
            warn!(export_id = %handle.export_id, "Rejecting unusable export id");
            return Err(BackendError::decode(
                Operation::RequestExport,
                serde_json::Error::custom(format!(
                    "export id {:?} is not usable as a file name",
                    handle.export_id
                )),
            ));
        }

        info!(
            project_id = %project_id,
            export_id = %handle.export_id,
            "Export created"
        );
        Ok(handle)
    }

    /// Start downloading the artifact for `export_id`.
    ///
    /// A non-2xx status fails here. Errors while reading the body arrive as
    /// items of the returned stream.
    pub async fn download_artifact(&self, export_id: &str) -> BackendResult<ByteStream> {
        let url = self.download_url(export_id);
        debug!(url = %url, "Downloading artifact");

        self.http
            .get_stream(&url, &Headers::new())
            .await
            .map_err(|e| {
                warn!(export_id = %export_id, error = %e, "Artifact download failed");
                BackendError::request(Operation::Download, e)
            })
    }

    /// Check if the service is reachable and healthy.
    ///
    /// Healthy means a 2xx answer with `{"status": "ok"}`. Any other answer is
    /// `Ok(false)`; only transport failures are errors.
    pub async fn health_check(&self) -> BackendResult<bool> {
        let url = self.health_url();
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| BackendError::request(Operation::HealthCheck, e))?;

        if !response.is_success() {
            debug!(status = response.status, "Health check answered with error status");
            return Ok(false);
        }

        match response.json::<HealthResponse>() {
            Ok(health) => {
                debug!(reported = %health.status, "Health check answered");
                Ok(health.is_ok())
            }
            Err(e) => {
                debug!(error = %e, "Health check body not understood");
                Ok(false)
            }
        }
    }

    async fn post_document(
        &self,
        operation: Operation,
        url: &str,
        document: &FrameDocument,
    ) -> BackendResult<Response> {
        let body = serde_json::to_string(document)
            .map_err(|source| BackendError::EncodeFailed { operation, source })?;

        debug!(operation = %operation, url = %url, bytes = body.len(), "Sending document");

        let result = self
            .http
            .post(url, &body, &json_headers())
            .await
            .and_then(ensure_success);

        result.map_err(|e| {
            warn!(operation = %operation, url = %url, error = %e, "Request failed");
            BackendError::request(operation, e)
        })
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

/// Turn a non-2xx response into [`HttpError::ServerError`].
fn ensure_success(response: Response) -> Result<Response, HttpError> {
    if response.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .ok()
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "Unknown error".to_string());
    Err(HttpError::ServerError {
        status: response.status,
        message,
    })
}

/// Percent-encode an identifier for use as one path segment.
fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}
