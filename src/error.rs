//! Error types for the document-ai client.
//!
//! One enum, four families, so callers can always tell *where* a request
//! died without string-matching:
//!
//! * **Configuration** — missing key/bucket/credentials, bad environment or
//!   storage selection. Raised at construction or dispatch, before any I/O.
//! * **Resolution** — the document could not be materialised locally
//!   (object missing, download rejected, unsupported type or format).
//!   These are value-level failures, distinct from the wire failing.
//! * **Transport** — the HTTP layer itself failed (connect, timeout,
//!   malformed body for the declared content type).
//! * **Remote API** — the service answered with a non-success status; the
//!   raw response body rides along as the error detail.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the document-ai client.
#[derive(Debug, Error)]
pub enum DocumentAiError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// No API key was supplied and the `APIKEY` environment variable is unset.
    #[error("No API key configured. Pass one to the builder or set the APIKEY environment variable.")]
    MissingApiKey,

    /// Environment string was neither `DEV` nor `PROD`.
    #[error("Invalid environment '{name}': expected DEV or PROD")]
    InvalidEnvironment { name: String },

    /// Storage-type string did not name a known backend.
    #[error("Unsupported storage type '{kind}': expected one of local, gcs, s3, url")]
    UnsupportedStorageType { kind: String },

    /// A cloud backend was selected but no bucket is configured.
    #[error("No bucket configured for the {backend} backend. Pass one to the builder or set the BUCKET environment variable.")]
    MissingBucket { backend: &'static str },

    /// A cloud backend was selected but its credentials are absent.
    #[error("Missing {backend} credentials: {detail}")]
    MissingCredentials { backend: &'static str, detail: String },

    // ── Resolution errors ─────────────────────────────────────────────────
    /// The requested document type is not in the supported set.
    #[error("Unsupported document type '{kind}'")]
    UnsupportedDocumentType { kind: String },

    /// The object exists in no form under the configured bucket.
    #[error("Object '{key}' not found in bucket '{bucket}'")]
    ObjectNotFound { bucket: String, key: String },

    /// The backend could not materialise the document locally.
    #[error("Failed to fetch '{reference}': {reason}")]
    FetchFailed { reference: String, reason: String },

    /// The bank-statement path only understands PDF, PNG and JPEG artifacts.
    #[error("Unsupported file format '{format}' for '{path}'")]
    UnsupportedFormat { path: PathBuf, format: String },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The HTTP request never produced a usable response.
    #[error("HTTP transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Remote-API errors ─────────────────────────────────────────────────
    /// The service rejected the request; `detail` is the raw response body.
    #[error("API request rejected with HTTP {status}: {detail}")]
    Api { status: u16, detail: String },

    // ── Local I/O errors ──────────────────────────────────────────────────
    /// Reading or writing a staged artifact failed.
    #[error("I/O failure at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image → one-page-PDF conversion failed.
    #[error("Failed to convert '{path}' to PDF: {detail}")]
    ImageConversion { path: PathBuf, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_carries_status_and_body() {
        let e = DocumentAiError::Api {
            status: 422,
            detail: r#"{"error":"unreadable scan"}"#.into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("422"), "got: {msg}");
        assert!(msg.contains("unreadable scan"));
    }

    #[test]
    fn object_not_found_names_bucket_and_key() {
        let e = DocumentAiError::ObjectNotFound {
            bucket: "statements".into(),
            key: "2024/jan.pdf".into(),
        };
        assert!(e.to_string().contains("statements"));
        assert!(e.to_string().contains("2024/jan.pdf"));
    }

    #[test]
    fn unsupported_format_names_the_extension() {
        let e = DocumentAiError::UnsupportedFormat {
            path: PathBuf::from("/tmp/req/scan.tiff"),
            format: "tiff".into(),
        };
        assert!(e.to_string().contains("tiff"));
    }
}
