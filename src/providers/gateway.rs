//! OpenAI-compatible AI gateway provider
//!
//! Sends `POST {api_base}/chat/completions` with a bearer key. Images are
//! sent as `image_url` content parts carrying a data URL.

use crate::config::GatewayConfig;
use crate::error::{AerosuiteError, Result};
use crate::providers::base::{status_error, CompletionResponse, Message, Provider, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider for an OpenAI-compatible chat completions gateway
///
/// # Examples
///
/// ```
/// use aerosuite::config::GatewayConfig;
/// use aerosuite::providers::GatewayProvider;
///
/// let config = GatewayConfig {
///     api_key: Some("test-key".to_string()),
///     ..GatewayConfig::default()
/// };
/// let provider = GatewayProvider::new(config, 30).unwrap();
/// assert_eq!(provider.model_name(), "google/gemini-2.5-flash");
/// ```
pub struct GatewayProvider {
    client: Client,
    config: GatewayConfig,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GatewayRequest {
    model: String,
    messages: Vec<GatewayMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GatewayMessage {
    role: String,
    content: GatewayContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GatewayContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    choices: Vec<GatewayChoice>,
    #[serde(default)]
    usage: Option<GatewayUsage>,
}

#[derive(Debug, Deserialize)]
struct GatewayChoice {
    message: GatewayResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GatewayResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GatewayUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl GatewayProvider {
    /// Create a new gateway provider
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` when no API key is configured, or
    /// `Provider` if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig, timeout_seconds: u64) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AerosuiteError::MissingCredentials("gateway".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("aerosuite/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AerosuiteError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized gateway provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Configured model identifier
    pub fn model_name(&self) -> &str {
        &self.config.model
    }

    fn convert_messages(messages: &[Message]) -> Vec<GatewayMessage> {
        messages
            .iter()
            .map(|m| {
                let content = match &m.image {
                    Some(image) => GatewayContent::Parts(vec![
                        ContentPart::Text {
                            text: m.content.clone(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image.data_url(),
                            },
                        },
                    ]),
                    None => GatewayContent::Text(m.content.clone()),
                };
                GatewayMessage {
                    role: m.role.clone(),
                    content,
                }
            })
            .collect()
    }
}

#[async_trait]
impl Provider for GatewayProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );

        let request = GatewayRequest {
            model: self.config.model.clone(),
            messages: Self::convert_messages(messages),
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            "Sending gateway request: {} messages, model={}",
            request.messages.len(),
            request.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gateway request failed: {}", e);
                AerosuiteError::Provider(format!("Gateway request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gateway returned error {}: {}", status, error_text);
            return Err(status_error("gateway", status, &error_text).into());
        }

        let body: GatewayResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse gateway response: {}", e);
            AerosuiteError::Provider(format!("Failed to parse gateway response: {}", e))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        let message = Message::assistant(content);
        Ok(match body.usage {
            Some(usage) => CompletionResponse::with_usage(
                message,
                TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
            ),
            None => CompletionResponse::new(message),
        })
    }

    fn name(&self) -> &str {
        "gateway"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ImageAttachment;

    fn config() -> GatewayConfig {
        GatewayConfig {
            api_key: Some("secret".to_string()),
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let err = GatewayProvider::new(GatewayConfig::default(), 30)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Missing credentials"));
    }

    #[test]
    fn test_new_rejects_blank_api_key() {
        let config = GatewayConfig {
            api_key: Some("  ".to_string()),
            ..GatewayConfig::default()
        };
        assert!(GatewayProvider::new(config, 30).is_err());
    }

    #[test]
    fn test_provider_identity() {
        let provider = GatewayProvider::new(config(), 30).unwrap();
        assert_eq!(provider.name(), "gateway");
        assert_eq!(provider.model(), "google/gemini-2.5-flash");
    }

    #[test]
    fn test_convert_text_message() {
        let converted = GatewayProvider::convert_messages(&[Message::system("sys")]);
        let json = serde_json::to_value(&converted).unwrap();
        assert_eq!(json[0]["role"], "system");
        assert_eq!(json[0]["content"], "sys");
    }

    #[test]
    fn test_convert_image_message_uses_parts() {
        let image = ImageAttachment {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        };
        let converted =
            GatewayProvider::convert_messages(&[Message::user_with_image("what is this", image)]);
        let json = serde_json::to_value(&converted).unwrap();
        assert_eq!(json[0]["content"][0]["type"], "text");
        assert_eq!(json[0]["content"][1]["type"], "image_url");
        assert_eq!(
            json[0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
    }
}
