//! Configuration management for Aerosuite
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{AerosuiteError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Aerosuite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider configuration (gateway, Gemini)
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Current-model storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Viewer normalization and camera settings
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Drag analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Analysis function server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider configuration
///
/// Specifies which completion service to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use ("gateway" or "gemini")
    #[serde(rename = "type")]
    pub provider_type: String,

    /// OpenAI-compatible AI gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// HTTP request timeout for completion calls (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: "gateway".to_string(),
            gateway: GatewayConfig::default(),
            gemini: GeminiConfig::default(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// OpenAI-compatible chat completions gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_gateway_api_base")]
    pub api_base: String,

    /// Model identifier sent with each request
    #[serde(default = "default_gateway_model")]
    pub model: String,

    /// Completion token cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Bearer token (prefer `AEROSUITE_GATEWAY_API_KEY`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_gateway_api_base() -> String {
    "https://ai.gateway.lovable.dev/v1".to_string()
}

fn default_gateway_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: default_gateway_api_base(),
            model: default_gateway_model(),
            max_tokens: default_max_tokens(),
            api_key: None,
        }
    }
}

/// Google Gemini `generateContent` configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL; `/v1beta/models/{model}:generateContent` is appended
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API key (prefer `AEROSUITE_GEMINI_API_KEY`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: default_gemini_api_base(),
            model: default_gemini_model(),
            api_key: None,
        }
    }
}

/// Current-model storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database directory; platform data dir when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Largest accepted upload (bytes)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024 // 100 MiB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl StorageConfig {
    /// Resolve the database directory
    ///
    /// # Errors
    ///
    /// Returns `AerosuiteError::Storage` if no platform data directory exists
    pub fn resolve_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("dev", "aerosuite", "aerosuite")
            .ok_or_else(|| AerosuiteError::Storage("Could not determine data directory".into()))?;
        Ok(proj_dirs.data_dir().join("models.db"))
    }
}

/// Viewer normalization and camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Largest dimension of a normalized model (scene units)
    #[serde(default = "default_target_size")]
    pub target_size: f32,

    /// Initial camera position
    #[serde(default = "default_camera_position")]
    pub camera_position: [f32; 3],

    /// Vertical field of view (degrees)
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,

    /// Closest orbit distance
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,

    /// Farthest orbit distance
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
}

fn default_target_size() -> f32 {
    2.0
}

fn default_camera_position() -> [f32; 3] {
    [5.0, 5.0, 5.0]
}

fn default_fov_degrees() -> f32 {
    50.0
}

fn default_min_distance() -> f32 {
    1.0
}

fn default_max_distance() -> f32 {
    20.0
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            camera_position: default_camera_position(),
            fov_degrees: default_fov_degrees(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
        }
    }
}

/// Drag analysis configuration
///
/// When `endpoint` is set, analysis requests go to a remote analysis function
/// (for example `aerosuite serve` on another host) instead of the provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Full URL of the remote `/aero-analysis` function
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token for the remote function
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

/// Analysis function server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Emit JSON-formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    /// A missing file yields the defaults.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AerosuiteError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| AerosuiteError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("AEROSUITE_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(timeout) = std::env::var("AEROSUITE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid AEROSUITE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(base) = std::env::var("AEROSUITE_GATEWAY_API_BASE") {
            self.provider.gateway.api_base = base;
        }
        if let Ok(model) = std::env::var("AEROSUITE_GATEWAY_MODEL") {
            self.provider.gateway.model = model;
        }
        if let Ok(key) = std::env::var("AEROSUITE_GATEWAY_API_KEY") {
            self.provider.gateway.api_key = Some(key);
        }

        if let Ok(base) = std::env::var("AEROSUITE_GEMINI_API_BASE") {
            self.provider.gemini.api_base = base;
        }
        if let Ok(model) = std::env::var("AEROSUITE_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }
        if let Ok(key) = std::env::var("AEROSUITE_GEMINI_API_KEY") {
            self.provider.gemini.api_key = Some(key);
        }

        if let Ok(path) = std::env::var("AEROSUITE_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Ok(endpoint) = std::env::var("AEROSUITE_ANALYSIS_ENDPOINT") {
            self.analysis.endpoint = Some(endpoint);
        }
        if let Ok(key) = std::env::var("AEROSUITE_ANALYSIS_API_KEY") {
            self.analysis.api_key = Some(key);
        }

        if let Ok(bind) = std::env::var("AEROSUITE_SERVER_BIND") {
            self.server.bind = bind;
        }

        if let Ok(json) = std::env::var("AEROSUITE_LOG_JSON") {
            match json.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.logging.json = true,
                "0" | "false" | "no" => self.logging.json = false,
                _ => tracing::warn!("Invalid AEROSUITE_LOG_JSON: {}", json),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(provider) = &cli.provider {
            self.provider.provider_type = provider.clone();
        }
        if let Some(path) = &cli.storage_path {
            self.storage.path = Some(path.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `AerosuiteError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        match self.provider.provider_type.as_str() {
            "gateway" | "gemini" => {}
            "" => {
                return Err(AerosuiteError::Config("Provider type cannot be empty".into()).into())
            }
            other => {
                return Err(AerosuiteError::Config(format!(
                    "Invalid provider type: {} (expected gateway or gemini)",
                    other
                ))
                .into())
            }
        }

        if self.provider.timeout_seconds == 0 {
            return Err(
                AerosuiteError::Config("timeout_seconds must be greater than 0".into()).into(),
            );
        }

        validate_url("provider.gateway.api_base", &self.provider.gateway.api_base)?;
        validate_url("provider.gemini.api_base", &self.provider.gemini.api_base)?;
        if let Some(endpoint) = &self.analysis.endpoint {
            validate_url("analysis.endpoint", endpoint)?;
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(
                AerosuiteError::Config("max_upload_bytes must be greater than 0".into()).into(),
            );
        }

        let viewer = &self.viewer;
        if !(viewer.target_size.is_finite() && viewer.target_size > 0.0) {
            return Err(AerosuiteError::Config("target_size must be a positive number".into()).into());
        }
        if !(viewer.fov_degrees > 0.0 && viewer.fov_degrees < 180.0) {
            return Err(
                AerosuiteError::Config("fov_degrees must be between 0 and 180".into()).into(),
            );
        }
        if viewer.min_distance <= 0.0 || viewer.min_distance >= viewer.max_distance {
            return Err(AerosuiteError::Config(
                "min_distance must be positive and smaller than max_distance".into(),
            )
            .into());
        }

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(AerosuiteError::Config(format!(
                "Invalid server bind address: {}",
                self.server.bind
            ))
            .into());
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| AerosuiteError::Config(format!("Invalid URL for {}: {}", field, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AerosuiteError::Config(format!(
            "Unsupported URL scheme '{}' for {}",
            scheme, field
        ))
        .into()),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            storage: StorageConfig::default(),
            viewer: ViewerConfig::default(),
            analysis: AnalysisConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
