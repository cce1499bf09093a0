//! Inbound relay payload
//!
//! This module defines the browser-facing request body: a user prompt, an
//! optional system prompt, and an optional model override. Field names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Relay request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub user_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_request() {
        let request: RelayRequest = serde_json::from_str(
            r#"{"userPrompt": "hello", "systemPrompt": "be brief", "model": "gemini-2.0-flash"}"#,
        )
        .unwrap();
        assert_eq!(request.user_prompt, "hello");
        assert_eq!(request.system_prompt.as_deref(), Some("be brief"));
        assert_eq!(request.model.as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_parse_minimal_request() {
        let request: RelayRequest = serde_json::from_str(r#"{"userPrompt": "hello"}"#).unwrap();
        assert_eq!(request.user_prompt, "hello");
        assert!(request.system_prompt.is_none());
        assert!(request.model.is_none());
    }

    #[test]
    fn test_user_prompt_is_required() {
        let result: Result<RelayRequest, _> =
            serde_json::from_str(r#"{"systemPrompt": "be brief"}"#);
        assert!(result.is_err());
    }
}
