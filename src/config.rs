//! Client configuration: credentials, environment and storage selection.
//!
//! Everything a [`crate::client::DocumentClient`] needs is fixed in one
//! immutable [`ClientConfig`] built through its builder. Components never
//! read configuration ambiently after construction — the API key and base
//! URL are resolved exactly once, so a client that exists is a client that
//! can issue requests.

use crate::error::DocumentAiError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default per-request timeout for API calls, in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default timeout for generic-URL document downloads, in seconds.
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 120;

/// Which deployment of the document-intelligence API to talk to.
///
/// The base-URL table is fixed; use [`ClientConfigBuilder::endpoint`] to
/// point at a self-hosted gateway instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Mock/sandbox deployment.
    #[default]
    Dev,
    /// Live deployment.
    Prod,
}

impl Environment {
    /// Base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Dev => "https://mock.powercred.io",
            Environment::Prod => "https://dev.powercred.io",
        }
    }
}

impl FromStr for Environment {
    type Err = DocumentAiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(DocumentAiError::InvalidEnvironment {
                name: s.to_string(),
            }),
        }
    }
}

/// Which storage backend resolves remote references into local files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// References are already local paths; no I/O.
    #[default]
    Local,
    /// Google Cloud Storage object keys.
    Gcs,
    /// AWS S3 object keys.
    S3,
    /// Arbitrary HTTP(S) URLs.
    Url,
}

impl FromStr for StorageKind {
    type Err = DocumentAiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(StorageKind::Local),
            "gcs" => Ok(StorageKind::Gcs),
            "s3" => Ok(StorageKind::S3),
            "url" => Ok(StorageKind::Url),
            _ => Err(DocumentAiError::UnsupportedStorageType {
                kind: s.to_string(),
            }),
        }
    }
}

/// Immutable configuration shared by every component that issues requests.
///
/// # Example
/// ```rust,no_run
/// use document_ai::{ClientConfig, Environment, StorageKind};
///
/// let config = ClientConfig::builder()
///     .api_key("pc_live_…")
///     .environment(Environment::Prod)
///     .storage(StorageKind::S3)
///     .bucket("customer-uploads")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as the `apikey` query parameter on every request.
    pub api_key: String,

    /// Selected deployment. Default: [`Environment::Dev`].
    pub environment: Environment,

    /// Selected storage backend. Default: [`StorageKind::Local`].
    pub storage: StorageKind,

    /// Bucket for the cloud backends. Falls back to the `BUCKET`
    /// environment variable at backend construction when unset.
    pub bucket: Option<String>,

    /// Base-URL override for self-hosted gateways and test stubs.
    /// Takes precedence over the environment table when set.
    pub endpoint: Option<String>,

    /// Per-request timeout for API calls, in seconds. Default: 60.
    pub request_timeout_secs: u64,

    /// Timeout for generic-URL document downloads, in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl ClientConfig {
    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// The base URL every request is rooted at.
    pub fn base_url(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    environment: Environment,
    storage: StorageKind,
    bucket: Option<String>,
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
    download_timeout_secs: Option<u64>,
}

impl ClientConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn environment(mut self, env: Environment) -> Self {
        self.environment = env;
        self
    }

    pub fn storage(mut self, kind: StorageKind) -> Self {
        self.storage = kind;
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Override the environment base URL entirely.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs.max(1));
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.download_timeout_secs = Some(secs.max(1));
        self
    }

    /// Build the configuration, resolving the API key.
    ///
    /// The key comes from [`api_key`](Self::api_key) or, failing that, the
    /// `APIKEY` environment variable. An empty key is treated as absent.
    pub fn build(self) -> Result<ClientConfig, DocumentAiError> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("APIKEY").ok().filter(|k| !k.is_empty()))
            .ok_or(DocumentAiError::MissingApiKey)?;

        Ok(ClientConfig {
            api_key,
            environment: self.environment,
            storage: self.storage,
            bucket: self.bucket,
            endpoint: self.endpoint,
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            download_timeout_secs: self
                .download_timeout_secs
                .unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_base_url_table() {
        assert_eq!(Environment::Dev.base_url(), "https://mock.powercred.io");
        assert_eq!(Environment::Prod.base_url(), "https://dev.powercred.io");
    }

    #[test]
    fn environment_parsing_is_case_insensitive() {
        assert_eq!("DEV".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Prod);
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(DocumentAiError::InvalidEnvironment { name }) if name == "staging"
        ));
    }

    #[test]
    fn storage_kind_parses_the_closed_set() {
        assert_eq!("local".parse::<StorageKind>().unwrap(), StorageKind::Local);
        assert_eq!("GCS".parse::<StorageKind>().unwrap(), StorageKind::Gcs);
        assert_eq!("s3".parse::<StorageKind>().unwrap(), StorageKind::S3);
        assert_eq!("url".parse::<StorageKind>().unwrap(), StorageKind::Url);
        assert!(matches!(
            "ftp".parse::<StorageKind>(),
            Err(DocumentAiError::UnsupportedStorageType { kind }) if kind == "ftp"
        ));
    }

    #[test]
    fn endpoint_override_wins_over_environment() {
        let config = ClientConfig::builder()
            .api_key("k")
            .environment(Environment::Prod)
            .endpoint("http://127.0.0.1:9999")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn explicit_key_is_used_verbatim() {
        let config = ClientConfig::builder().api_key("pc_test_123").build().unwrap();
        assert_eq!(config.api_key, "pc_test_123");
    }

    #[test]
    fn defaults_are_dev_and_local() {
        let config = ClientConfig::builder().api_key("k").build().unwrap();
        assert_eq!(config.environment, Environment::Dev);
        assert_eq!(config.storage, StorageKind::Local);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.download_timeout_secs, 120);
    }
}
