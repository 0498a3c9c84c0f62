//! Shared HTTP gateway for the document-intelligence API.
//!
//! Every component that talks to the remote service goes through one
//! [`Gateway`]: it owns the connection pool, injects the API key, and
//! decodes responses by their declared content type. Centralising this
//! keeps the failure semantics identical whether the caller is the parse
//! orchestrator or the auth helper — transport problems are always
//! [`DocumentAiError::Transport`], remote rejections always surface with
//! their status and raw body.
//!
//! The API key rides in the query string, never in the body. An
//! intercepted or logged URL therefore reveals the key and query
//! parameters but no payload fields; callers must not treat the key as
//! hidden.

use crate::error::DocumentAiError;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Ceiling on pooled connections per host, so concurrent parse requests
/// cannot grow sockets without bound.
const MAX_POOLED_CONNECTIONS: usize = 150;

/// A decoded response body.
///
/// The branch is driven by the response's declared `Content-Type`:
/// `application/json` parses into [`Payload::Json`], everything else is
/// returned verbatim as [`Payload::Text`]. This is a commitment, not a
/// fallback — callers must not assume JSON when the server says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// Structured body from an `application/json` response.
    Json(serde_json::Value),
    /// Raw body from any other content type.
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Json(value) => write!(f, "{value}"),
            Payload::Text(text) => f.write_str(text),
        }
    }
}

/// A decoded response plus the HTTP status it arrived with.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Payload,
}

/// The shared request layer: base URL, API key, bounded connection pool.
#[derive(Debug, Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Gateway {
    /// Build a gateway rooted at `base_url`.
    ///
    /// The pool ceiling and timeout are fixed at construction; no state
    /// changes afterwards, so a `Gateway` is freely cloneable and shareable.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DocumentAiError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(MAX_POOLED_CONNECTIONS)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Issue a GET request.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, DocumentAiError> {
        self.send(self.http.get(self.url(path)), query).await
    }

    /// Issue a POST request with a JSON body.
    pub async fn post_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<ApiResponse, DocumentAiError> {
        self.send(self.http.post(self.url(path)).json(body), query)
            .await
    }

    /// Issue a POST request with a multipart form body.
    pub async fn post_multipart(
        &self,
        path: &str,
        query: &[(&str, &str)],
        form: Form,
    ) -> Result<ApiResponse, DocumentAiError> {
        self.send(self.http.post(self.url(path)).multipart(form), query)
            .await
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// One attempt per call — retry policy, if any, belongs to the caller.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, DocumentAiError> {
        let request = request
            .query(query)
            .query(&[("apikey", self.api_key.as_str())]);

        let response = request.send().await.map_err(|e| {
            warn!("request failed before a response arrived: {e}");
            DocumentAiError::Transport(e)
        })?;

        let status = response.status().as_u16();
        let data = decode(response).await?;
        debug!(status, "response decoded");
        Ok(ApiResponse { status, data })
    }
}

/// Decode the body according to the declared content type.
async fn decode(response: reqwest::Response) -> Result<Payload, DocumentAiError> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);

    if is_json {
        Ok(Payload::Json(response.json().await?))
    } else {
        Ok(Payload::Text(response.text().await?))
    }
}
