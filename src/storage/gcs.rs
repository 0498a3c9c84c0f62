//! Google Cloud Storage backend.
//!
//! Construction only checks configuration (bucket name and the
//! `GOOGLE_APPLICATION_CREDENTIALS` pointer); the authenticated client is
//! built inside `fetch` because token exchange is itself an async
//! operation. A 404 from the object API maps to the distinct
//! [`DocumentAiError::ObjectNotFound`] so callers can tell a missing
//! document from a broken connection.

use crate::error::DocumentAiError;
use crate::storage::base_name;
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// GCS object fetcher bound to one bucket.
#[derive(Debug)]
pub struct GcsStore {
    bucket: String,
}

impl GcsStore {
    /// Build the store from an explicit bucket or the `BUCKET` environment
    /// variable. `GOOGLE_APPLICATION_CREDENTIALS` must point at a service
    /// account key for the download to be authorised later.
    pub fn from_env(bucket: Option<String>) -> Result<Self, DocumentAiError> {
        let bucket = bucket
            .or_else(|| env::var("BUCKET").ok())
            .filter(|b| !b.is_empty())
            .ok_or(DocumentAiError::MissingBucket { backend: "gcs" })?;

        if env::var("GOOGLE_APPLICATION_CREDENTIALS")
            .ok()
            .filter(|v| !v.is_empty())
            .is_none()
        {
            return Err(DocumentAiError::MissingCredentials {
                backend: "gcs",
                detail: "set GOOGLE_APPLICATION_CREDENTIALS to a service account key file".into(),
            });
        }

        Ok(Self { bucket })
    }

    /// Download `object` into `dest_dir`, preserving its base filename.
    pub async fn fetch(&self, object: &str, dest_dir: &Path) -> Result<PathBuf, DocumentAiError> {
        let config = ClientConfig::default().with_auth().await.map_err(|e| {
            DocumentAiError::MissingCredentials {
                backend: "gcs",
                detail: e.to_string(),
            }
        })?;
        let client = Client::new(config);

        let request = GetObjectRequest {
            bucket: self.bucket.clone(),
            object: object.to_string(),
            ..Default::default()
        };

        let bytes = client
            .download_object(&request, &Range::default())
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    DocumentAiError::ObjectNotFound {
                        bucket: self.bucket.clone(),
                        key: object.to_string(),
                    }
                } else {
                    error!("GCS download failed for '{object}': {e}");
                    DocumentAiError::FetchFailed {
                        reference: object.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let out = dest_dir.join(base_name(object));
        tokio::fs::write(&out, &bytes)
            .await
            .map_err(|e| DocumentAiError::Io {
                path: out.clone(),
                source: e,
            })?;

        info!(
            "downloaded gs://{}/{object} to {}",
            self.bucket,
            out.display()
        );
        Ok(out)
    }
}

fn is_not_found(err: &google_cloud_storage::http::Error) -> bool {
    matches!(
        err,
        google_cloud_storage::http::Error::Response(response) if response.code == 404
    )
}
