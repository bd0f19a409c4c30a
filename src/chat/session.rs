//! Copilot chat session
//!
//! The log is append-only and starts with a fixed greeting. Each accepted
//! submission appends one user message and then exactly one assistant
//! message, whatever the completion service does.

use super::catalog::{
    copilot_prompt, FAILURE_REPLY, GREETING, IMAGE_ANALYSIS_PROMPT, IMAGE_UPLOAD_TEXT,
    MISSING_KEY_REPLY,
};
use super::image::load_attachment;
use crate::error::Result;
use crate::providers::{ImageAttachment, Message, Provider};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use ulid::Ulid;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person using the copilot
    User,
    /// The copilot
    Assistant,
}

/// One entry in the chat log
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Unique, time-sortable identifier
    pub id: Ulid,
    /// Author
    pub role: ChatRole,
    /// Message text
    pub text: String,
    /// Attached image, user messages only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,
    /// When the message was appended
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, text: impl Into<String>, image: Option<ImageAttachment>) -> Self {
        Self {
            id: Ulid::new(),
            role,
            text: text.into(),
            image,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only list of chat messages
#[derive(Debug, Clone, Serialize)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// A log containing only the greeting
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Assistant, GREETING, None)],
        }
    }

    /// Messages in order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the greeting is never removed
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

/// A copilot conversation bound to an optional completion provider
///
/// Submissions take `&mut self`, so a second submission cannot start while
/// one is awaiting its reply.
pub struct CopilotSession {
    log: ChatLog,
    provider: Option<Arc<dyn Provider>>,
}

impl CopilotSession {
    /// Create a session
    ///
    /// Without a provider every reply is the fixed "enter your API key" hint.
    pub fn new(provider: Option<Arc<dyn Provider>>) -> Self {
        Self {
            log: ChatLog::new(),
            provider,
        }
    }

    /// The conversation so far
    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    /// Whether a completion provider is configured
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Submit a question
    ///
    /// Whitespace-only input is ignored and returns `None`. Otherwise the
    /// question and one reply are appended and the reply is returned.
    pub async fn submit(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        self.log
            .push(ChatMessage::new(ChatRole::User, text, None));
        let request = vec![Message::user(copilot_prompt(text))];
        Some(self.reply(&request).await)
    }

    /// Attach an image file and ask for an analysis
    ///
    /// # Errors
    ///
    /// Fails without touching the log if the file is not a decodable image.
    pub async fn submit_image(&mut self, path: &Path) -> Result<&ChatMessage> {
        let (attachment, info) = load_attachment(path).await?;
        tracing::debug!(
            width = info.width,
            height = info.height,
            "Attached image {}",
            path.display()
        );
        Ok(self.submit_attachment(attachment).await)
    }

    /// Ask for an analysis of an already-validated image
    pub async fn submit_attachment(&mut self, attachment: ImageAttachment) -> &ChatMessage {
        self.log.push(ChatMessage::new(
            ChatRole::User,
            IMAGE_UPLOAD_TEXT,
            Some(attachment.clone()),
        ));
        let request = vec![Message::user_with_image(
            copilot_prompt(IMAGE_ANALYSIS_PROMPT),
            attachment,
        )];
        self.reply(&request).await
    }

    /// Append exactly one assistant message answering `request`
    async fn reply(&mut self, request: &[Message]) -> &ChatMessage {
        let text = match &self.provider {
            None => MISSING_KEY_REPLY.to_string(),
            Some(provider) => match provider.complete(request).await {
                Ok(response) => {
                    if let Some(usage) = response.usage {
                        tracing::debug!(
                            provider = provider.name(),
                            total_tokens = usage.total_tokens,
                            "Copilot reply received"
                        );
                    }
                    if response.message.content.trim().is_empty() {
                        tracing::warn!(provider = provider.name(), "Copilot reply was empty");
                        FAILURE_REPLY.to_string()
                    } else {
                        response.message.content
                    }
                }
                Err(e) => {
                    tracing::error!(provider = provider.name(), "Copilot request failed: {}", e);
                    FAILURE_REPLY.to_string()
                }
            },
        };

        self.log
            .push(ChatMessage::new(ChatRole::Assistant, text, None))
    }
}
