//! Provider module for Aerosuite
//!
//! This module contains the completion-service abstraction and the
//! implementations for the OpenAI-compatible gateway and Google Gemini.

pub mod base;
pub mod gateway;
pub mod gemini;

pub use base::{CompletionResponse, ImageAttachment, Message, Provider, TokenUsage};
pub use gateway::GatewayProvider;
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::{AerosuiteError, Result};

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration; `provider_type` selects the backend
///
/// # Errors
///
/// Returns `MissingCredentials` if the selected provider has no API key, or
/// `Provider` for an unknown provider type.
///
/// # Examples
///
/// ```
/// use aerosuite::config::ProviderConfig;
/// use aerosuite::providers::create_provider;
///
/// let mut config = ProviderConfig::default();
/// config.gateway.api_key = Some("key".to_string());
/// let provider = create_provider(&config).unwrap();
/// assert_eq!(provider.name(), "gateway");
/// ```
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "gateway" => Ok(Box::new(GatewayProvider::new(
            config.gateway.clone(),
            config.timeout_seconds,
        )?)),
        "gemini" => Ok(Box::new(GeminiProvider::new(
            config.gemini.clone(),
            config.timeout_seconds,
        )?)),
        other => Err(AerosuiteError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
