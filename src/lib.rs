//! # document-ai
//!
//! Async client for the PowerCred document-intelligence API: fetch a
//! source document from a pluggable storage backend, submit it for
//! classification/extraction, and hand back the normalized result.
//!
//! ## Pipeline Overview
//!
//! ```text
//! reference (path / object key / URL)
//!  │
//!  ├─ 1. Storage   fetch into a per-request staging directory
//!  ├─ 2. Route     document type → extract-then-get, or bank parse
//!  ├─ 3. Convert   PNG/JPEG bank statements → one-page PDF
//!  └─ 4. Gateway   apikey-tagged HTTP calls, JSON/text decoding
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use document_ai::{ClientConfig, DocumentClient, Environment, StorageKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), document_ai::DocumentAiError> {
//!     // API key auto-detected from APIKEY when not set explicitly
//!     let config = ClientConfig::builder()
//!         .environment(Environment::Dev)
//!         .storage(StorageKind::S3)
//!         .bucket("customer-uploads")
//!         .build()?;
//!     let client = DocumentClient::new(config)?;
//!
//!     let outcome = client
//!         .parse_document("req-42", "2024/01/invoice.pdf", "invoice")
//!         .await?;
//!     println!("{:?}", outcome.payload());
//!     Ok(())
//! }
//! ```
//!
//! ## Storage backends
//!
//! | Kind    | Reference        | Credentials |
//! |---------|------------------|-------------|
//! | `local` | filesystem path  | none |
//! | `gcs`   | object key       | `BUCKET`, `GOOGLE_APPLICATION_CREDENTIALS` |
//! | `s3`    | object key       | `BUCKET`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, optional `AWS_REGION` |
//! | `url`   | HTTP(S) URL      | none |
//!
//! The crate performs no OCR or extraction itself — it is transport and
//! orchestration for the remote service, one attempt per call, no retries.
//! Wrap calls in `tokio::time::timeout` if you need caller-side deadlines.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod parse;
pub mod storage;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use auth::Auth;
pub use client::DocumentClient;
pub use config::{ClientConfig, ClientConfigBuilder, Environment, StorageKind};
pub use error::DocumentAiError;
pub use gateway::{ApiResponse, Gateway, Payload};
pub use parse::{DocumentType, ParseOutcome};
pub use storage::StorageBackend;
