//! Artifact files on disk.
//!
//! Each download lands in its own `<exportId>.pptx.<attempt>.part` and is
//! renamed over `<exportId>.pptx` only after the whole body was written, so a
//! reader never sees a truncated presentation and concurrent attempts for the
//! same id never share a file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{BackendError, BackendResult, Operation};
use crate::traits::ByteStream;

/// Extension of exported presentations.
pub const ARTIFACT_EXTENSION: &str = "pptx";

/// Suffix appended to an artifact path while it is being written.
pub const PARTIAL_SUFFIX: &str = ".part";

/// A presentation that was exported and saved locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifact {
    /// Identifier assigned by the service
    pub export_id: String,
    /// Download reference returned alongside the id
    pub download_ref: String,
    /// Final location of the file
    pub path: PathBuf,
    /// Bytes written
    pub size: u64,
}

impl ExportedArtifact {
    /// File name shown to users, e.g. `demo-1a2b3c4d.pptx`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| artifact_file_name(&self.export_id))
    }
}

/// `<exportId>.pptx`
pub fn artifact_file_name(export_id: &str) -> String {
    format!("{}.{}", export_id, ARTIFACT_EXTENSION)
}

/// Fresh `<destination>.<attempt>.part` path, unique per call.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(format!(".{}{}", Uuid::new_v4().simple(), PARTIAL_SUFFIX));
    PathBuf::from(name)
}

/// Whether `file_name` is a partial artifact written by [`persist_stream`].
pub fn is_partial_name(file_name: &str) -> bool {
    let marker = format!(".{}.", ARTIFACT_EXTENSION);
    file_name.ends_with(PARTIAL_SUFFIX) && file_name.contains(&marker)
}

/// Drain `stream` into `destination`, going through a partial file.
///
/// On any failure the partial file is removed and `destination` is left as it
/// was. Returns the number of bytes written.
pub async fn persist_stream(mut stream: ByteStream, destination: &Path) -> BackendResult<u64> {
    let partial = partial_path(destination);

    let size = match write_partial(&mut stream, &partial).await {
        Ok(size) => size,
        Err(err) => {
            discard(&partial).await;
            return Err(err);
        }
    };

    if let Err(e) = tokio::fs::rename(&partial, destination).await {
        discard(&partial).await;
        return Err(BackendError::file_system(destination, e));
    }

    debug!(path = %destination.display(), bytes = size, "Artifact saved");
    Ok(size)
}

async fn write_partial(stream: &mut ByteStream, partial: &Path) -> BackendResult<u64> {
    let mut file = tokio::fs::File::create(partial)
        .await
        .map_err(|e| BackendError::file_system(partial, e))?;

    let mut size = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| BackendError::request(Operation::Download, e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| BackendError::file_system(partial, e))?;
        size += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| BackendError::file_system(partial, e))?;

    Ok(size)
}

async fn discard(partial: &Path) {
    match tokio::fs::remove_file(partial).await {
        Ok(()) => debug!(path = %partial.display(), "Removed partial download"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %partial.display(), error = %e, "Could not remove partial download"),
    }
}

/// Delete `*.pptx.*.part` files left in `dir` by an interrupted process.
///
/// A missing directory counts as clean. Returns how many files were removed.
pub async fn remove_partials(dir: &Path) -> BackendResult<usize> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(BackendError::file_system(dir, e)),
    };

    let mut removed = 0;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| BackendError::file_system(dir, e))?
    {
        if !is_partial_name(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| BackendError::file_system(&path, e))?;
        removed += 1;
    }

    Ok(removed)
}
