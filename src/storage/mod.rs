//! Storage backends: resolve a remote reference into a local file.
//!
//! Four interchangeable strategies share one capability —
//! `fetch(reference, dest_dir) -> local path` — and nothing else. The
//! variant is picked once, at client construction, from the configured
//! [`StorageKind`](crate::config::StorageKind); per-call dispatch is a
//! plain `match`, so an unsupported selection can only fail before the
//! first request.
//!
//! Failure vocabulary is deliberately narrow: a missing object is
//! [`DocumentAiError::ObjectNotFound`], any other resolution problem is
//! [`DocumentAiError::FetchFailed`]. Neither is a transport error — the
//! orchestrator treats them as value-level rejections of the reference.

pub mod gcs;
pub mod s3;
pub mod url;

use crate::config::{ClientConfig, StorageKind};
use crate::error::DocumentAiError;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use gcs::GcsStore;
pub use s3::S3Store;
pub use url::UrlStore;

/// The resolved storage strategy.
#[derive(Debug)]
pub enum StorageBackend {
    /// References are already local paths; `fetch` is the identity.
    Local,
    /// Google Cloud Storage.
    Gcs(GcsStore),
    /// AWS S3.
    S3(S3Store),
    /// Plain HTTP(S) downloads.
    Url(UrlStore),
}

impl StorageBackend {
    /// Resolve the configured backend, failing fast on missing buckets or
    /// credentials so that misconfiguration never survives to a request.
    pub fn from_config(config: &ClientConfig) -> Result<Self, DocumentAiError> {
        match config.storage {
            StorageKind::Local => Ok(StorageBackend::Local),
            StorageKind::Gcs => Ok(StorageBackend::Gcs(GcsStore::from_env(
                config.bucket.clone(),
            )?)),
            StorageKind::S3 => Ok(StorageBackend::S3(S3Store::from_env(
                config.bucket.clone(),
            )?)),
            StorageKind::Url => Ok(StorageBackend::Url(UrlStore::new(Duration::from_secs(
                config.download_timeout_secs,
            ))?)),
        }
    }

    /// Materialise `reference` as a file under `dest_dir`.
    ///
    /// The local backend returns the reference unchanged without touching
    /// the filesystem; the others download into `dest_dir` preserving the
    /// reference's base filename.
    pub async fn fetch(
        &self,
        reference: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, DocumentAiError> {
        match self {
            StorageBackend::Local => Ok(PathBuf::from(reference)),
            StorageBackend::Gcs(store) => store.fetch(reference, dest_dir).await,
            StorageBackend::S3(store) => store.fetch(reference, dest_dir).await,
            StorageBackend::Url(store) => store.fetch(reference, dest_dir).await,
        }
    }
}

/// Base filename of a reference (object key, path or URL path).
pub(crate) fn base_name(reference: &str) -> String {
    Path::new(reference)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| reference.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_fetch_is_the_identity() {
        let backend = StorageBackend::Local;
        let dest = std::env::temp_dir();
        let path = backend
            .fetch("/data/uploads/invoice.pdf", &dest)
            .await
            .unwrap();
        assert_eq!(path, PathBuf::from("/data/uploads/invoice.pdf"));
    }

    #[test]
    fn base_name_takes_the_last_segment() {
        assert_eq!(base_name("a/b/report.pdf"), "report.pdf");
        assert_eq!(base_name("report.pdf"), "report.pdf");
        assert_eq!(base_name("2024/01/scan.png"), "scan.png");
    }
}
