//! Google Gemini `generateContent` provider

use crate::config::GeminiConfig;
use crate::error::{AerosuiteError, Result};
use crate::providers::base::{status_error, CompletionResponse, Message, Provider, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider for the Gemini generative language API
///
/// System messages are folded into `systemInstruction`; assistant turns are
/// sent with the `model` role.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` when no API key is configured.
    pub fn new(config: GeminiConfig, timeout_seconds: u64) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AerosuiteError::MissingCredentials("gemini".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("aerosuite/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AerosuiteError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized Gemini provider: model={}", config.model);

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn build_request(messages: &[Message]) -> GeminiRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            if message.role == "system" {
                system_parts.push(GeminiPart::Text {
                    text: message.content.clone(),
                });
                continue;
            }

            let role = if message.role == "assistant" {
                "model"
            } else {
                "user"
            };
            let mut parts = vec![GeminiPart::Text {
                text: message.content.clone(),
            }];
            if let Some(image) = &message.image {
                parts.push(GeminiPart::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                });
            }
            contents.push(GeminiContent {
                role: Some(role.to_string()),
                parts,
            });
        }

        GeminiRequest {
            contents,
            system_instruction: (!system_parts.is_empty()).then_some(GeminiContent {
                role: None,
                parts: system_parts,
            }),
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        );
        let request = Self::build_request(messages);

        tracing::debug!(
            "Sending Gemini request: {} contents, model={}",
            request.contents.len(),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                AerosuiteError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(status_error("gemini", status, &error_text).into());
        }

        let body: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            AerosuiteError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| match p {
                        GeminiPart::Text { text } => Some(text),
                        GeminiPart::InlineData { .. } => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let message = Message::assistant(text);
        Ok(match body.usage_metadata {
            Some(usage) => CompletionResponse::with_usage(
                message,
                TokenUsage::new(usage.prompt_token_count, usage.candidates_token_count),
            ),
            None => CompletionResponse::new(message),
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ImageAttachment;

    #[test]
    fn test_new_requires_api_key() {
        assert!(GeminiProvider::new(GeminiConfig::default(), 30).is_err());
    }

    #[test]
    fn test_build_request_splits_system_instruction() {
        let request = GeminiProvider::build_request(&[
            Message::system("be brief"),
            Message::user("hello"),
            Message::assistant("hi"),
        ]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["contents"].as_array().unwrap().len(), 2);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][1]["role"], "model");
    }

    #[test]
    fn test_build_request_without_system_omits_instruction() {
        let request = GeminiProvider::build_request(&[Message::user("hello")]);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_build_request_inlines_image() {
        let image = ImageAttachment {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        };
        let request = GeminiProvider::build_request(&[Message::user_with_image("look", image)]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(json["contents"][0]["parts"][1]["inline_data"]["data"], "AAAA");
    }
}
