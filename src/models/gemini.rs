//! Gemini generateContent wire format
//!
//! This module defines the request structures for the Google Generative
//! Language API, matching the v1beta generateContent body layout.

use crate::models::relay::RelayRequest;
use serde::{Deserialize, Serialize};

/// A single text part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Ordered list of parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    /// Wrap a single text string in the parts layout
    fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

/// Generation configuration sent with every request
///
/// The upstream field name is snake_case, unlike its camelCase siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub response_mime_type: String,
}

/// Gemini generateContent request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

impl GenerateContentRequest {
    /// Build the upstream payload from an inbound relay request
    ///
    /// The user prompt becomes the single contents entry, the system prompt
    /// (when supplied) becomes the systemInstruction, and the generation
    /// config always asks the upstream for JSON-formatted output.
    pub fn from_relay(request: &RelayRequest) -> Self {
        Self {
            contents: vec![Content::text(&request.user_prompt)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
            system_instruction: request.system_prompt.as_deref().map(Content::text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay_request(system_prompt: Option<&str>) -> RelayRequest {
        RelayRequest {
            user_prompt: "hello".to_string(),
            system_prompt: system_prompt.map(|s| s.to_string()),
            model: None,
        }
    }

    #[test]
    fn test_user_prompt_becomes_contents() {
        let payload = GenerateContentRequest::from_relay(&relay_request(None));
        assert_eq!(payload.contents.len(), 1);
        assert_eq!(payload.contents[0].parts[0].text, "hello");
    }

    #[test]
    fn test_system_instruction_omitted_without_system_prompt() {
        let payload = GenerateContentRequest::from_relay(&relay_request(None));
        assert!(payload.system_instruction.is_none());

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_system_instruction_wraps_system_prompt() {
        let payload = GenerateContentRequest::from_relay(&relay_request(Some("be brief")));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "be brief"
        );
    }

    #[test]
    fn test_generation_config_requests_json_output() {
        let payload = GenerateContentRequest::from_relay(&relay_request(None));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value["generationConfig"]["response_mime_type"],
            "application/json"
        );
    }
}
