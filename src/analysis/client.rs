//! Sources of raw drag analysis text
//!
//! [`DirectAnalysis`] asks a completion provider itself. [`RemoteAnalysis`]
//! calls a deployed aero-analysis function (see `aerosuite serve`).

use super::prompt::{analysis_prompt, EMPTY_ANALYSIS_TEXT, SYSTEM_PROMPT};
use crate::error::{AerosuiteError, Result};
use crate::providers::base::status_error;
use crate::providers::{Message, Provider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Request body of the aero-analysis function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Name of the uploaded model file
    pub file_name: String,
}

/// Success body of the aero-analysis function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Raw analysis text
    pub analysis: String,
}

/// Error body of the aero-analysis function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisErrorBody {
    /// Human-readable error
    pub error: String,
}

/// Produces raw analysis text for a model file name
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Request analysis text
    ///
    /// # Errors
    ///
    /// Returns the provider or transport error unchanged.
    async fn request(&self, file_name: &str) -> Result<String>;
}

/// Analysis straight from a completion provider
pub struct DirectAnalysis {
    provider: Arc<dyn Provider>,
}

impl DirectAnalysis {
    /// Wrap a provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AnalysisClient for DirectAnalysis {
    async fn request(&self, file_name: &str) -> Result<String> {
        tracing::info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            "Aerodynamic analysis request for: {}",
            file_name
        );

        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(analysis_prompt(file_name)),
        ];
        let response = self.provider.complete(&messages).await?;
        let text = response.message.content;

        if text.trim().is_empty() {
            tracing::warn!("Completion returned no analysis text");
            return Ok(EMPTY_ANALYSIS_TEXT.to_string());
        }
        Ok(text)
    }
}

/// Analysis from a deployed aero-analysis function
pub struct RemoteAnalysis {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteAnalysis {
    /// Create a client for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns `Provider` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("aerosuite/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AerosuiteError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }
}

#[async_trait]
impl AnalysisClient for RemoteAnalysis {
    async fn request(&self, file_name: &str) -> Result<String> {
        tracing::debug!("Calling aero-analysis endpoint {} for {}", self.endpoint, file_name);

        let mut request = self.client.post(&self.endpoint).json(&AnalysisRequest {
            file_name: file_name.to_string(),
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Aero-analysis request failed: {}", e);
            AerosuiteError::Provider(format!("Aero-analysis request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<AnalysisErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_default();
            tracing::error!("Aero-analysis returned error {}: {}", status, detail);
            return Err(status_error("aero-analysis", status, &detail).into());
        }

        let body: AnalysisResponse = response.json().await.map_err(|e| {
            AerosuiteError::Provider(format!("Failed to parse aero-analysis response: {}", e))
        })?;
        Ok(body.analysis)
    }
}
