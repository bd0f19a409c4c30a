//! Error types for Aerosuite
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Aerosuite operations
///
/// Covers configuration loading, model ingestion and decoding, persistence,
/// and calls to the hosted completion services.
#[derive(Error, Debug)]
pub enum AerosuiteError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, unexpected responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The completion service answered 429
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The completion service answered 402 (credits or quota exhausted)
    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Authentication errors (e.g., 401 Unauthorized)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Uploaded file is not one of the supported model formats
    #[error("Unsupported model format '.{extension}': {hint}")]
    UnsupportedFormat {
        /// Extension found on the uploaded file (lowercase, may be empty)
        extension: String,
        /// Static remediation hint shown to the user
        hint: String,
    },

    /// Uploaded file has no content
    #[error("Model file is empty: {0}")]
    EmptyModel(String),

    /// Uploaded file exceeds the configured size limit
    #[error("Model file too large: {size} bytes exceeds limit of {limit} bytes")]
    ModelTooLarge {
        /// Size of the rejected payload
        size: usize,
        /// Configured limit
        limit: usize,
    },

    /// Mesh decoding failed
    #[error("Decode error: {0}")]
    Decode(String),

    /// Decoded scene contains no geometry
    #[error("Scene contains no geometry")]
    EmptyScene,

    /// Malformed `data:` URL
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Attachment is not a decodable image
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Model storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Aerosuite operations
///
/// Uses `anyhow::Error` so callers can attach context while still being able
/// to downcast to [`AerosuiteError`] where the variant matters.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = AerosuiteError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = AerosuiteError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_rate_limited_display() {
        let error = AerosuiteError::RateLimited("gateway".to_string());
        assert_eq!(error.to_string(), "Rate limit exceeded: gateway");
    }

    #[test]
    fn test_quota_exhausted_display() {
        let error = AerosuiteError::QuotaExhausted("credits".to_string());
        assert_eq!(error.to_string(), "Quota exhausted: credits");
    }

    #[test]
    fn test_unsupported_format_display() {
        let error = AerosuiteError::UnsupportedFormat {
            extension: "blend".to_string(),
            hint: "export as GLB".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unsupported model format '.blend': export as GLB"
        );
    }

    #[test]
    fn test_model_too_large_display() {
        let error = AerosuiteError::ModelTooLarge {
            size: 20,
            limit: 10,
        };
        let s = error.to_string();
        assert!(s.contains("20 bytes"));
        assert!(s.contains("limit of 10"));
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = AerosuiteError::MissingCredentials("gemini".to_string());
        assert_eq!(error.to_string(), "Missing credentials for provider: gemini");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: AerosuiteError = io_error.into();
        assert!(matches!(error, AerosuiteError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: AerosuiteError = json_error.into();
        assert!(matches!(error, AerosuiteError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: AerosuiteError = yaml_error.into();
        assert!(matches!(error, AerosuiteError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AerosuiteError>();
    }

    #[test]
    fn test_storage_error_display() {
        let error = AerosuiteError::Storage("database connection failed".to_string());
        assert_eq!(error.to_string(), "Storage error: database connection failed");
    }
}
