//! Generic-URL backend: plain HTTP GET into the staging directory.
//!
//! The output filename prefers the `Content-Disposition` header's
//! `filename=` token; absent that, the URL's trailing path segment. Any
//! non-success status yields a [`DocumentAiError::FetchFailed`] — this
//! backend never panics on a bad status, keeping its contract identical
//! to the object-store backends.

use crate::error::DocumentAiError;
use crate::storage::base_name;
use reqwest::header::CONTENT_DISPOSITION;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Downloads documents addressed by arbitrary HTTP(S) URLs.
///
/// Owns its own client: these downloads go to third-party hosts, so they
/// must not carry the API key the gateway injects.
#[derive(Debug)]
pub struct UrlStore {
    http: reqwest::Client,
}

impl UrlStore {
    pub fn new(timeout: Duration) -> Result<Self, DocumentAiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Download `url` into `dest_dir`.
    pub async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, DocumentAiError> {
        let response =
            self.http
                .get(url)
                .send()
                .await
                .map_err(|e| DocumentAiError::FetchFailed {
                    reference: url.to_string(),
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("download of '{url}' rejected with HTTP {status}");
            return Err(DocumentAiError::FetchFailed {
                reference: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_filename)
            .unwrap_or_else(|| filename_from_url(url));
        let out = dest_dir.join(base_name(&filename));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DocumentAiError::FetchFailed {
                reference: url.to_string(),
                reason: e.to_string(),
            })?;

        tokio::fs::write(&out, &bytes)
            .await
            .map_err(|e| DocumentAiError::Io {
                path: out.clone(),
                source: e,
            })?;

        info!("downloaded {url} to {}", out.display());
        Ok(out)
    }
}

/// Pull the `filename=` token out of a `Content-Disposition` value.
fn disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .find_map(|part| part.trim().strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Last path segment of the URL, ignoring query and fragment.
fn filename_from_url(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() {
                    return last.to_string();
                }
            }
        }
    }
    "download".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_filename_strips_quotes() {
        assert_eq!(
            disposition_filename(r#"attachment; filename="report.pdf""#),
            Some("report.pdf".to_string())
        );
        assert_eq!(
            disposition_filename("attachment; filename=raw.bin"),
            Some("raw.bin".to_string())
        );
    }

    #[test]
    fn disposition_without_filename_is_none() {
        assert_eq!(disposition_filename("inline"), None);
        assert_eq!(disposition_filename(r#"attachment; filename="""#), None);
    }

    #[test]
    fn url_fallback_takes_the_trailing_segment() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/docs/statement.pdf?sig=abc"),
            "statement.pdf"
        );
        assert_eq!(filename_from_url("https://example.com/"), "download");
        assert_eq!(filename_from_url("not a url"), "download");
    }
}
