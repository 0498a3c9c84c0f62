//! The document-parse orchestrator.
//!
//! [`DocumentClient::parse_document`] is the primary entry point: it
//! stages the document locally through the configured storage backend,
//! then drives the remote call sequence the document type demands.
//!
//! ## Per-request state machine
//!
//! ```text
//! resolve local ──▶ invoice / payslip / … ──▶ POST extract ──▶ GET get
//!       │
//!       └──▶ bank_statement ──▶ pdf  ──▶ POST parse/bank/async
//!                              image ──▶ derive pdf ──▶ POST parse/bank
//! ```
//!
//! Errors at any step propagate unchanged — the orchestrator never
//! swallows a failure into a defaulted result. Each request stages its
//! artifacts in an OS-temp directory keyed by the caller's request id;
//! concurrent requests with distinct ids therefore never share files.
//! Staged files are left for OS temp-dir policy to reclaim.

use crate::config::ClientConfig;
use crate::error::DocumentAiError;
use crate::gateway::Gateway;
use crate::parse::mime::{self, DocumentFormat};
use crate::parse::{convert, DocumentType, ParseOutcome};
use crate::storage::StorageBackend;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Client for the document-intelligence API.
///
/// Construction resolves everything that can fail from configuration —
/// storage credentials, bucket, API key — so an existing client can always
/// issue requests. The client is cheap to share behind an `Arc` across
/// concurrent parse requests.
///
/// # Example
/// ```rust,no_run
/// use document_ai::{ClientConfig, DocumentClient, StorageKind};
///
/// # async fn run() -> Result<(), document_ai::DocumentAiError> {
/// let config = ClientConfig::builder()
///     .api_key("pc_live_…")
///     .storage(StorageKind::Local)
///     .build()?;
/// let client = DocumentClient::new(config)?;
/// let outcome = client
///     .parse_document("req-42", "/uploads/invoice.pdf", "invoice")
///     .await?;
/// println!("{:?}", outcome.payload());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DocumentClient {
    gateway: Gateway,
    storage: StorageBackend,
}

impl DocumentClient {
    /// Build a client, resolving the storage backend and gateway up front.
    pub fn new(config: ClientConfig) -> Result<Self, DocumentAiError> {
        let storage = StorageBackend::from_config(&config)?;
        let gateway = Gateway::new(
            config.base_url(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self { gateway, storage })
    }

    /// Parse one document.
    ///
    /// * `id` — caller-supplied request identifier; tags the remote job
    ///   and names the local staging directory
    /// * `source` — storage reference: local path, object key or URL
    /// * `document_type` — wire name of the type, e.g. `"invoice"` or
    ///   `"bank_statement"`; anything outside the supported set fails
    ///   before any network I/O
    pub async fn parse_document(
        &self,
        id: &str,
        source: &str,
        document_type: &str,
    ) -> Result<ParseOutcome, DocumentAiError> {
        let document_type: DocumentType = document_type.parse()?;
        info!("parse request {id}: {document_type} from '{source}'");

        let staging = scoped_temp_dir(id)?;
        let local = self.storage.fetch(source, &staging).await?;
        debug!("request {id}: staged at {}", local.display());

        match document_type {
            DocumentType::BankStatement => self.parse_bank_statement(id, &local, &staging).await,
            other => self.extract(id, other, &local).await,
        }
    }

    /// Submit-then-fetch sequence for the synchronous document types.
    ///
    /// The remote extraction job is asynchronous on the server side, hence
    /// two calls: a multipart upload to `extract`, then a `get` for the
    /// result keyed by the same request id. A rejected upload short-circuits
    /// — `get` is never issued.
    async fn extract(
        &self,
        id: &str,
        document_type: DocumentType,
        file: &Path,
    ) -> Result<ParseOutcome, DocumentAiError> {
        let category = document_type.category();

        let form = file_form(format!("{category}_file"), file).await?;
        let submitted = self
            .gateway
            .post_multipart(&format!("document/{category}/extract"), &[("id", id)], form)
            .await?;
        if submitted.status != 200 {
            return Err(DocumentAiError::Api {
                status: submitted.status,
                detail: submitted.data.to_string(),
            });
        }

        let result = self
            .gateway
            .get(&format!("document/{category}/get"), &[("id", id)])
            .await?;
        Ok(ParseOutcome::Extracted(result.data))
    }

    /// Bank statements route by detected format instead of category.
    async fn parse_bank_statement(
        &self,
        id: &str,
        file: &Path,
        staging: &Path,
    ) -> Result<ParseOutcome, DocumentAiError> {
        match mime::detect(file) {
            DocumentFormat::Pdf => {
                let form = file_form("file", file).await?;
                let response = self
                    .gateway
                    .post_multipart("parse/bank/async", &[("id", id)], form)
                    .await?;
                Ok(ParseOutcome::Bank {
                    accepted: response.status == 200,
                    response: response.data,
                })
            }
            format @ (DocumentFormat::Png | DocumentFormat::Jpeg) => {
                debug!("request {id}: converting {} image to PDF", format.mime_type());
                let src = file.to_path_buf();
                let dest = staging.to_path_buf();
                let derived = tokio::task::spawn_blocking(move || convert::image_to_pdf(&src, &dest))
                    .await
                    .map_err(|e| DocumentAiError::ImageConversion {
                        path: file.to_path_buf(),
                        detail: e.to_string(),
                    })??;

                let form = file_form("file", &derived).await?;
                let response = self
                    .gateway
                    .post_multipart("parse/bank", &[("id", id)], form)
                    .await?;
                Ok(ParseOutcome::Bank {
                    accepted: response.status == 200,
                    response: response.data,
                })
            }
            DocumentFormat::Unknown(extension) => Err(DocumentAiError::UnsupportedFormat {
                path: file.to_path_buf(),
                format: extension,
            }),
        }
    }
}

/// Staging directory for one request: `$TMPDIR/<id>`, created if absent.
fn scoped_temp_dir(id: &str) -> Result<PathBuf, DocumentAiError> {
    let dir = std::env::temp_dir().join(id);
    std::fs::create_dir_all(&dir).map_err(|e| DocumentAiError::Io {
        path: dir.clone(),
        source: e,
    })?;
    Ok(dir)
}

/// Multipart form with one file part under `field`.
async fn file_form(
    field: impl Into<std::borrow::Cow<'static, str>>,
    path: &Path,
) -> Result<Form, DocumentAiError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| DocumentAiError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(Form::new().part(field, Part::bytes(bytes).file_name(file_name)))
}
