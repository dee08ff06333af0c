use serde::{Deserialize, Serialize};

/// Correlation token returned when an export is requested.
///
/// Lives for one export cycle: created by the export request, consumed by the
/// download, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportHandle {
    #[serde(rename = "exportId")]
    pub export_id: String,
    /// Server-relative download location, informational only.
    #[serde(rename = "download")]
    pub download_ref: String,
}

impl ExportHandle {
    pub fn new(export_id: impl Into<String>, download_ref: impl Into<String>) -> Self {
        Self {
            export_id: export_id.into(),
            download_ref: download_ref.into(),
        }
    }

    /// Whether the export id can name a local file without escaping its directory.
    pub fn has_safe_id(&self) -> bool {
        let id = self.export_id.as_str();
        !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
    }
}

/// Body of a successful health check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
