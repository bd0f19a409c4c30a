//! Single-slot model repository
//!
//! Exactly one model is "current" at a time. Writing a new model replaces
//! the previous one; there is no history and no versioning.

use super::types::{StoredModel, UploadedModel, CURRENT_MODEL_ID};
use crate::error::{AerosuiteError, Result};
use sled::Db;
use std::path::Path;
use std::sync::RwLock;

/// Durable storage for the current model
pub trait ModelRepository: Send + Sync {
    /// Replace the current model
    fn put(&self, model: &UploadedModel) -> Result<()>;

    /// Read the current model, if any
    fn get(&self) -> Result<Option<UploadedModel>>;

    /// Remove the current model. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<()>;
}

/// Model repository backed by an embedded `sled` database
///
/// The record lives under the fixed key `current-model` as JSON.
pub struct SledModelRepository {
    db: Db,
}

impl SledModelRepository {
    /// Open or create the repository
    ///
    /// # Errors
    ///
    /// Returns `AerosuiteError::Storage` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use aerosuite::model::SledModelRepository;
    ///
    /// # fn main() -> aerosuite::error::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let repo = SledModelRepository::new(dir.path().join("models.db"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| AerosuiteError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }
}

impl ModelRepository for SledModelRepository {
    fn put(&self, model: &UploadedModel) -> Result<()> {
        let value = serde_json::to_vec(&model.to_stored())
            .map_err(|e| AerosuiteError::Storage(format!("Serialization failed: {}", e)))?;

        self.db
            .insert(CURRENT_MODEL_ID.as_bytes(), value)
            .map_err(|e| AerosuiteError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| AerosuiteError::Storage(format!("Flush failed: {}", e)))?;

        tracing::debug!(
            file_name = %model.file_name,
            size = model.size_bytes(),
            "Persisted current model"
        );
        Ok(())
    }

    fn get(&self) -> Result<Option<UploadedModel>> {
        match self
            .db
            .get(CURRENT_MODEL_ID.as_bytes())
            .map_err(|e| AerosuiteError::Storage(format!("Get failed: {}", e)))?
        {
            Some(bytes) => {
                let stored: StoredModel = serde_json::from_slice(&bytes).map_err(|e| {
                    AerosuiteError::Storage(format!("Deserialization failed: {}", e))
                })?;
                Ok(Some(stored.into_model()?))
            }
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<()> {
        self.db
            .remove(CURRENT_MODEL_ID.as_bytes())
            .map_err(|e| AerosuiteError::Storage(format!("Remove failed: {}", e)))?;
        self.db
            .flush()
            .map_err(|e| AerosuiteError::Storage(format!("Flush failed: {}", e)))?;
        Ok(())
    }
}

/// In-process repository, lost when the process exits
///
/// Serves as the session slot when durable storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryModelRepository {
    slot: RwLock<Option<UploadedModel>>,
}

impl MemoryModelRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelRepository for MemoryModelRepository {
    fn put(&self, model: &UploadedModel) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| AerosuiteError::Storage("Session slot lock poisoned".to_string()))?;
        *slot = Some(model.clone());
        Ok(())
    }

    fn get(&self) -> Result<Option<UploadedModel>> {
        let slot = self
            .slot
            .read()
            .map_err(|_| AerosuiteError::Storage("Session slot lock poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| AerosuiteError::Storage("Session slot lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
