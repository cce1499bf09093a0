//! Gemini upstream client
//!
//! This module provides an async HTTP client for the Google Generative
//! Language API generateContent endpoint. The relay makes exactly one
//! attempt per inbound request: no timeout, no retry.

use crate::models::gemini::GenerateContentRequest;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Error types that can occur during the upstream call
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Failed to parse upstream response: {0}")]
    Decode(String),
}

/// Status code and JSON body returned by the upstream endpoint
///
/// Carried back to the handler unmodified so the relay can re-emit the
/// upstream outcome verbatim, non-2xx included.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

/// Async client for the generateContent endpoint
pub struct GeminiClient {
    client: Client,
    base_url: String,
    default_model: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Upstream base URL
    /// * `default_model` - Model used when the request does not name one
    pub fn new(base_url: String, default_model: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            default_model,
        }
    }

    /// Select the effective model name
    ///
    /// Returns the requested model if present and non-empty, otherwise the
    /// configured default.
    pub fn effective_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(model) if !model.is_empty() => model,
            _ => &self.default_model,
        }
    }

    /// Build the generateContent URL for a model, with the key appended as
    /// a query parameter
    fn endpoint_url(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, api_key
        )
    }

    /// Send a generateContent request upstream
    ///
    /// The upstream body is parsed as JSON even on non-2xx status: an
    /// upstream application error is relayed verbatim with its status code,
    /// not treated as a local failure.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Transport` if the request cannot be sent and
    /// `GeminiError::Decode` if the upstream body is not JSON.
    pub async fn generate(
        &self,
        model: &str,
        api_key: &str,
        payload: &GenerateContentRequest,
    ) -> Result<UpstreamReply, GeminiError> {
        let url = self.endpoint_url(model, api_key);

        debug!("Forwarding generateContent request: model={}", model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| GeminiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();

        let body: Value = response
            .json()
            .await
            .map_err(|e| GeminiError::Decode(e.to_string()))?;

        Ok(UpstreamReply { status, body })
    }
}
