//! Base provider trait and common message types
//!
//! This module defines the Provider trait implemented by every hosted
//! completion service, along with the message, attachment and response
//! types shared between them.

use crate::error::{AerosuiteError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Inline image sent alongside a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl ImageAttachment {
    /// Render as a `data:` URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Message structure for conversation
///
/// Represents one turn sent to or received from a completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Text content of the message
    pub content: String,
    /// Optional inline image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use aerosuite::providers::Message;
    ///
    /// let msg = Message::user("How do I pad a sketch?");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            image: None,
        }
    }

    /// Creates a user message carrying an image
    pub fn user_with_image(content: impl Into<String>, image: ImageAttachment) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            image: Some(image),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            image: None,
        }
    }

    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use aerosuite::providers::Message;
    ///
    /// let msg = Message::system("You are an expert aerodynamics engineer");
    /// assert_eq!(msg.role, "system");
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            image: None,
        }
    }
}

/// Token usage reported by the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: usize,
    /// Tokens in the completion
    pub completion_tokens: usize,
    /// Sum of both
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create usage from prompt and completion counts
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Response from a completion call
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The response message from the service
    pub message: Message,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a response without usage information
    ///
    /// # Examples
    ///
    /// ```
    /// use aerosuite::providers::{CompletionResponse, Message};
    ///
    /// let response = CompletionResponse::new(Message::assistant("Cd 0.29"));
    /// assert_eq!(response.text(), "Cd 0.29");
    /// ```
    pub fn new(message: Message) -> Self {
        Self {
            message,
            usage: None,
        }
    }

    /// Create a response with token usage
    pub fn with_usage(message: Message, usage: TokenUsage) -> Self {
        Self {
            message,
            usage: Some(usage),
        }
    }

    /// Text of the response message
    pub fn text(&self) -> &str {
        &self.message.content
    }
}

/// A hosted text-completion service
///
/// Implementations send the full message list and return a single assistant
/// message. They never retry.
///
/// # Examples
///
/// ```
/// use aerosuite::providers::{CompletionResponse, Message, Provider};
/// use aerosuite::error::Result;
/// use async_trait::async_trait;
///
/// struct Canned;
///
/// #[async_trait]
/// impl Provider for Canned {
///     async fn complete(&self, _messages: &[Message]) -> Result<CompletionResponse> {
///         Ok(CompletionResponse::new(Message::assistant("DRAG_COEFFICIENT: 0.29")))
///     }
///
///     fn name(&self) -> &str {
///         "canned"
///     }
///
///     fn model(&self) -> &str {
///         "fixed"
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Complete a conversation
    ///
    /// # Errors
    ///
    /// Returns `RateLimited`, `QuotaExhausted` or `Authentication` for the
    /// matching HTTP statuses, `Provider` for any other failure.
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse>;

    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Model identifier sent with each request
    fn model(&self) -> &str;
}

/// Map a non-success HTTP status to the matching error variant
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> AerosuiteError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => AerosuiteError::RateLimited(provider.to_string()),
        StatusCode::PAYMENT_REQUIRED => AerosuiteError::QuotaExhausted(provider.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AerosuiteError::Authentication(
            format!("{} rejected credentials ({})", provider, status),
        ),
        _ => AerosuiteError::Provider(format!(
            "{} returned error {}: {}",
            provider, status, body
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("a").role, "user");
        assert_eq!(Message::assistant("b").role, "assistant");
        assert_eq!(Message::system("c").role, "system");
        assert!(Message::user("a").image.is_none());
    }

    #[test]
    fn test_user_with_image() {
        let image = ImageAttachment {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        };
        let msg = Message::user_with_image("look", image.clone());
        assert_eq!(msg.image, Some(image));
    }

    #[test]
    fn test_image_data_url() {
        let image = ImageAttachment {
            mime_type: "image/jpeg".to_string(),
            data: "Zm9v".to_string(),
        };
        assert_eq!(image.data_url(), "data:image/jpeg;base64,Zm9v");
    }

    #[test]
    fn test_message_serialization_skips_missing_image() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage::new(100, 28);
        assert_eq!(usage.total_tokens, 128);
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error("gateway", StatusCode::TOO_MANY_REQUESTS, ""),
            AerosuiteError::RateLimited(_)
        ));
        assert!(matches!(
            status_error("gateway", StatusCode::PAYMENT_REQUIRED, ""),
            AerosuiteError::QuotaExhausted(_)
        ));
        assert!(matches!(
            status_error("gemini", StatusCode::FORBIDDEN, ""),
            AerosuiteError::Authentication(_)
        ));
        let err = status_error("gemini", StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, AerosuiteError::Provider(_)));
        assert!(err.to_string().contains("boom"));
    }
}
