use super::data_url;
use super::format::SupportedFormat;
use crate::error::{AerosuiteError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Key of the single persisted slot
pub const CURRENT_MODEL_ID: &str = "current-model";

/// The model currently loaded for viewing and analysis
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedModel {
    /// Original file name, including extension
    pub file_name: String,
    /// Format chosen from the extension
    pub format: SupportedFormat,
    /// Raw file bytes
    pub payload: Vec<u8>,
    /// When the model was accepted
    pub persisted_at: DateTime<Utc>,
    /// Hex SHA-256 of the payload
    pub sha256: String,
}

impl UploadedModel {
    /// Build a model record from an accepted upload
    pub fn new(file_name: impl Into<String>, format: SupportedFormat, payload: Vec<u8>) -> Self {
        let sha256 = format!("{:x}", Sha256::digest(&payload));
        Self {
            file_name: file_name.into(),
            format,
            payload,
            persisted_at: Utc::now(),
            sha256,
        }
    }

    /// Payload size in bytes
    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }

    /// Convert to the persisted record form
    pub fn to_stored(&self) -> StoredModel {
        StoredModel {
            id: CURRENT_MODEL_ID.to_string(),
            data_url: data_url::encode(self.format.mime_type(), &self.payload),
            file_type: self.format,
            file_name: self.file_name.clone(),
            size_bytes: self.payload.len(),
            sha256: self.sha256.clone(),
            timestamp: self.persisted_at,
        }
    }
}

/// Persisted form of the current model
///
/// The payload travels as a self-contained base64 data URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredModel {
    /// Always [`CURRENT_MODEL_ID`]
    pub id: String,
    /// `data:<mime>;base64,...`
    pub data_url: String,
    /// Format of the payload
    pub file_type: SupportedFormat,
    /// Original file name
    pub file_name: String,
    /// Payload size in bytes
    pub size_bytes: usize,
    /// Hex SHA-256 of the payload
    pub sha256: String,
    /// When the model was accepted
    pub timestamp: DateTime<Utc>,
}

impl StoredModel {
    /// Decode the data URL back into an [`UploadedModel`]
    ///
    /// # Errors
    ///
    /// Returns `AerosuiteError::InvalidDataUrl` if the payload is malformed
    /// or `AerosuiteError::Storage` if the digest no longer matches.
    pub fn into_model(self) -> Result<UploadedModel> {
        let (_, payload) = data_url::decode(&self.data_url)?;
        let digest = format!("{:x}", Sha256::digest(&payload));
        if digest != self.sha256 {
            return Err(AerosuiteError::Storage(format!(
                "Stored model '{}' failed integrity check",
                self.file_name
            ))
            .into());
        }

        Ok(UploadedModel {
            file_name: self.file_name,
            format: self.file_type,
            payload,
            persisted_at: self.timestamp,
            sha256: digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_model_round_trip() {
        let model = UploadedModel::new("coupe.obj", SupportedFormat::Obj, b"v 0 0 0\n".to_vec());
        let stored = model.to_stored();
        assert_eq!(stored.id, CURRENT_MODEL_ID);
        assert!(stored.data_url.starts_with("data:model/obj;base64,"));
        assert_eq!(stored.into_model().unwrap(), model);
    }

    #[test]
    fn test_stored_model_serializes_camel_case() {
        let model = UploadedModel::new("car.glb", SupportedFormat::Glb, vec![1, 2, 3]);
        let json = serde_json::to_value(model.to_stored()).unwrap();
        assert_eq!(json["id"], "current-model");
        assert_eq!(json["fileType"], "glb");
        assert!(json["dataUrl"].as_str().unwrap().starts_with("data:"));
    }

    #[test]
    fn test_tampered_payload_fails_integrity_check() {
        let model = UploadedModel::new("car.glb", SupportedFormat::Glb, vec![1, 2, 3]);
        let mut stored = model.to_stored();
        stored.data_url = data_url::encode("model/gltf-binary", &[9, 9, 9]);
        let err = stored.into_model().unwrap_err();
        assert!(err.to_string().contains("integrity check"));
    }

    #[test]
    fn test_sha256_is_hex() {
        let model = UploadedModel::new("a.obj", SupportedFormat::Obj, Vec::new());
        assert_eq!(
            model.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
