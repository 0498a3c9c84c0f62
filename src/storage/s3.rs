//! AWS S3 backend.
//!
//! Construction validates bucket and credentials up front; `fetch` is a
//! single `GetObject` whose body is streamed to the destination file. The
//! SDK is natively async, so nothing here blocks the runtime.

use crate::error::DocumentAiError;
use crate::storage::base_name;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info};

const DEFAULT_REGION: &str = "us-east-1";

/// S3 object fetcher bound to one bucket.
#[derive(Debug)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Build the store from an explicit bucket or the `BUCKET` environment
    /// variable, plus `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` and an
    /// optional `AWS_REGION`.
    pub fn from_env(bucket: Option<String>) -> Result<Self, DocumentAiError> {
        let bucket = bucket
            .or_else(|| env::var("BUCKET").ok())
            .filter(|b| !b.is_empty())
            .ok_or(DocumentAiError::MissingBucket { backend: "s3" })?;

        let access_key = env::var("AWS_ACCESS_KEY_ID").ok().filter(|v| !v.is_empty());
        let secret_key = env::var("AWS_SECRET_ACCESS_KEY")
            .ok()
            .filter(|v| !v.is_empty());
        let (access_key, secret_key) = match (access_key, secret_key) {
            (Some(a), Some(s)) => (a, s),
            _ => {
                return Err(DocumentAiError::MissingCredentials {
                    backend: "s3",
                    detail: "set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY".into(),
                })
            }
        };

        let region = env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let credentials = Credentials::new(access_key, secret_key, None, None, "document-ai");
        let conf = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(region))
            .behavior_version_latest()
            .build();

        Ok(Self {
            client: Client::from_conf(conf),
            bucket,
        })
    }

    /// Download `key` into `dest_dir`, preserving the object's base filename.
    pub async fn fetch(&self, key: &str, dest_dir: &Path) -> Result<PathBuf, DocumentAiError> {
        let out = dest_dir.join(base_name(key));

        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    DocumentAiError::ObjectNotFound {
                        bucket: self.bucket.clone(),
                        key: key.to_string(),
                    }
                } else {
                    error!("S3 GetObject failed for '{key}': {service_error}");
                    DocumentAiError::FetchFailed {
                        reference: key.to_string(),
                        reason: service_error.to_string(),
                    }
                }
            })?;

        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| DocumentAiError::FetchFailed {
                reference: key.to_string(),
                reason: e.to_string(),
            })?;

        tokio::fs::write(&out, bytes.into_bytes())
            .await
            .map_err(|e| DocumentAiError::Io {
                path: out.clone(),
                source: e,
            })?;

        info!("downloaded s3://{}/{key} to {}", self.bucket, out.display());
        Ok(out)
    }
}
