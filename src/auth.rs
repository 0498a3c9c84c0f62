//! Session-token minting.
//!
//! A thin second caller of the [`Gateway`]: one endpoint, one body shape.
//! Failure semantics are the same as everywhere else — transport problems
//! are [`DocumentAiError::Transport`], a non-success status is
//! [`DocumentAiError::Api`] with the raw body as detail.

use crate::config::ClientConfig;
use crate::error::DocumentAiError;
use crate::gateway::{Gateway, Payload};
use std::time::Duration;
use tracing::error;

/// Mints session tokens for end users of the embedding application.
#[derive(Debug)]
pub struct Auth {
    gateway: Gateway,
    secret: String,
}

impl Auth {
    /// Build an auth helper sharing the client's credential context, plus
    /// the partner secret that authorises token minting.
    pub fn new(config: &ClientConfig, secret: impl Into<String>) -> Result<Self, DocumentAiError> {
        let gateway = Gateway::new(
            config.base_url(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self {
            gateway,
            secret: secret.into(),
        })
    }

    /// Request a session token for `user_id`.
    ///
    /// The secret travels as a query parameter, the user id in the JSON
    /// body; `redirect_url`, when given, is forwarded for the service to
    /// send the user back after the token exchange.
    pub async fn get_session_token(
        &self,
        user_id: &str,
        redirect_url: Option<&str>,
    ) -> Result<Payload, DocumentAiError> {
        let mut query = vec![("secret", self.secret.as_str())];
        if let Some(url) = redirect_url {
            query.push(("redirect_url", url));
        }
        let body = serde_json::json!({ "user_id": user_id });

        let response = self.gateway.post_json("auth/token", &query, &body).await?;
        if response.status != 200 {
            error!("token minting for '{user_id}' rejected: {}", response.data);
            return Err(DocumentAiError::Api {
                status: response.status,
                detail: response.data.to_string(),
            });
        }
        Ok(response.data)
    }
}
