//! Model upload validation and persistence
//!
//! Uploads are validated against the format allow-list before anything is
//! written. Accepted models go to the durable repository; if that write
//! fails the model is kept in a session-only slot so viewing still works.

use super::format::SupportedFormat;
use super::store::{MemoryModelRepository, ModelRepository};
use super::types::UploadedModel;
use crate::error::{AerosuiteError, Result};
use anyhow::Context;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of accepting an upload
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// The accepted model
    pub model: UploadedModel,
    /// Whether the durable write succeeded
    pub persisted: bool,
}

/// Validates uploads and maintains the current-model slot
pub struct ModelIngestor {
    repository: Option<Arc<dyn ModelRepository>>,
    session: MemoryModelRepository,
    // set while the newest upload exists only in the session slot
    session_only: AtomicBool,
    max_upload_bytes: usize,
}

impl ModelIngestor {
    /// Create an ingestor over a durable repository
    ///
    /// # Arguments
    ///
    /// * `repository` - Durable store for the current model
    /// * `max_upload_bytes` - Largest accepted payload
    pub fn new(repository: Arc<dyn ModelRepository>, max_upload_bytes: usize) -> Self {
        Self {
            repository: Some(repository),
            session: MemoryModelRepository::new(),
            session_only: AtomicBool::new(false),
            max_upload_bytes,
        }
    }

    /// Create an ingestor with no durable storage
    ///
    /// Every accepted upload lives in the session slot and reports
    /// `persisted: false`.
    pub fn session_only(max_upload_bytes: usize) -> Self {
        Self {
            repository: None,
            session: MemoryModelRepository::new(),
            session_only: AtomicBool::new(true),
            max_upload_bytes,
        }
    }

    /// Accept an upload as the current model
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat`, `EmptyModel` or `ModelTooLarge` without
    /// touching either slot. Storage failures do not fail the upload.
    pub fn ingest(&self, file_name: &str, bytes: Vec<u8>) -> Result<IngestOutcome> {
        let format = SupportedFormat::from_file_name(file_name).map_err(|e| {
            tracing::warn!(file_name, "Rejected upload: {}", e);
            e
        })?;

        if bytes.is_empty() {
            return Err(AerosuiteError::EmptyModel(file_name.to_string()).into());
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(AerosuiteError::ModelTooLarge {
                size: bytes.len(),
                limit: self.max_upload_bytes,
            }
            .into());
        }

        let model = UploadedModel::new(file_name, format, bytes);
        self.session.put(&model)?;

        let persisted = match &self.repository {
            None => false,
            Some(repository) => match repository.put(&model) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(
                        file_name,
                        "Failed to persist model, keeping it for this session only: {}",
                        e
                    );
                    // a stale durable record must not outlive the newer upload
                    if let Err(e) = repository.clear() {
                        tracing::warn!("Failed to clear stale persisted model: {}", e);
                    }
                    false
                }
            },
        };
        self.session_only.store(!persisted, Ordering::SeqCst);

        tracing::info!(
            file_name,
            format = %format,
            size = model.size_bytes(),
            persisted,
            "Accepted model upload"
        );

        Ok(IngestOutcome { model, persisted })
    }

    /// Read a file from disk and ingest it
    ///
    /// The file name (not the full path) is recorded on the model.
    ///
    /// # Errors
    ///
    /// Rejects unsupported formats before reading the file.
    pub fn ingest_path(&self, path: &Path) -> Result<IngestOutcome> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AerosuiteError::Config(format!("Invalid file path: {}", path.display())))?
            .to_string();

        SupportedFormat::from_file_name(&file_name)?;

        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read model file {}", path.display()))?;
        self.ingest(&file_name, bytes)
    }

    /// The current model
    ///
    /// Reads the durable slot unless the latest upload could not be
    /// persisted, in which case the session slot is authoritative.
    pub fn current(&self) -> Result<Option<UploadedModel>> {
        let repository = match &self.repository {
            Some(repository) if !self.session_only.load(Ordering::SeqCst) => repository,
            _ => return self.session.get(),
        };
        match repository.get() {
            Ok(Some(model)) => Ok(Some(model)),
            Ok(None) => self.session.get(),
            Err(e) => {
                tracing::warn!("Failed to read persisted model: {}", e);
                self.session.get()
            }
        }
    }

    /// Remove the current model from both slots
    pub fn clear(&self) -> Result<()> {
        self.session.clear()?;
        if let Some(repository) = &self.repository {
            self.session_only.store(false, Ordering::SeqCst);
            repository.clear()?;
        }
        tracing::info!("Cleared current model");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Repository that counts writes and can be made to fail
    #[derive(Default)]
    struct CountingRepository {
        inner: MemoryModelRepository,
        puts: AtomicUsize,
        fail: bool,
    }

    impl ModelRepository for CountingRepository {
        fn put(&self, model: &UploadedModel) -> Result<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AerosuiteError::Storage("quota exceeded".to_string()).into());
            }
            self.inner.put(model)
        }

        fn get(&self) -> Result<Option<UploadedModel>> {
            self.inner.get()
        }

        fn clear(&self) -> Result<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn test_rejected_upload_does_not_write() {
        let repo = Arc::new(CountingRepository::default());
        let ingestor = ModelIngestor::new(repo.clone(), 1024);

        let err = ingestor
            .ingest("concept.blend", b"BLENDER".to_vec())
            .unwrap_err();
        let err = err.downcast::<AerosuiteError>().unwrap();
        assert!(matches!(err, AerosuiteError::UnsupportedFormat { .. }));
        assert_eq!(repo.puts.load(Ordering::SeqCst), 0);
        assert!(ingestor.current().unwrap().is_none());
    }

    #[test]
    fn test_second_upload_replaces_first() {
        let repo = Arc::new(CountingRepository::default());
        let ingestor = ModelIngestor::new(repo.clone(), 1024);

        ingestor.ingest("a.obj", b"v 0 0 0".to_vec()).unwrap();
        ingestor.ingest("b.glb", b"glTF".to_vec()).unwrap();

        let current = ingestor.current().unwrap().unwrap();
        assert_eq!(current.file_name, "b.glb");
        assert_eq!(current.format, SupportedFormat::Glb);
    }

    #[test]
    fn test_storage_failure_falls_back_to_session() {
        let repo = Arc::new(CountingRepository {
            fail: true,
            ..Default::default()
        });
        let ingestor = ModelIngestor::new(repo, 1024);

        let outcome = ingestor.ingest("car.obj", b"v 0 0 0".to_vec()).unwrap();
        assert!(!outcome.persisted);
        assert_eq!(ingestor.current().unwrap().unwrap().file_name, "car.obj");
    }

    /// Accepts the first write, then fails every later one
    #[derive(Default)]
    struct FailsAfterFirstWrite {
        inner: MemoryModelRepository,
        puts: AtomicUsize,
    }

    impl ModelRepository for FailsAfterFirstWrite {
        fn put(&self, model: &UploadedModel) -> Result<()> {
            if self.puts.fetch_add(1, Ordering::SeqCst) > 0 {
                return Err(AerosuiteError::Storage("quota".to_string()).into());
            }
            self.inner.put(model)
        }

        fn get(&self) -> Result<Option<UploadedModel>> {
            self.inner.get()
        }

        fn clear(&self) -> Result<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn test_unpersisted_upload_replaces_persisted_one() {
        let repo = Arc::new(FailsAfterFirstWrite::default());
        let ingestor = ModelIngestor::new(repo.clone(), 1024);

        assert!(ingestor.ingest("a.obj", b"v 0 0 0".to_vec()).unwrap().persisted);
        let outcome = ingestor.ingest("b.obj", b"v 1 1 1".to_vec()).unwrap();
        assert!(!outcome.persisted);

        assert_eq!(ingestor.current().unwrap().unwrap().file_name, "b.obj");
        // the stale durable record is gone
        assert!(repo.get().unwrap().is_none());
    }

    #[test]
    fn test_session_only_ingestor_keeps_model_in_memory() {
        let ingestor = ModelIngestor::session_only(1024);
        let outcome = ingestor.ingest("car.obj", b"v 0 0 0".to_vec()).unwrap();
        assert!(!outcome.persisted);
        assert_eq!(ingestor.current().unwrap().unwrap().file_name, "car.obj");

        ingestor.clear().unwrap();
        assert!(ingestor.current().unwrap().is_none());
    }

    #[test]
    fn test_empty_upload_rejected() {
        let ingestor = ModelIngestor::new(Arc::new(MemoryModelRepository::new()), 1024);
        let err = ingestor.ingest("car.obj", Vec::new()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let ingestor = ModelIngestor::new(Arc::new(MemoryModelRepository::new()), 4);
        let err = ingestor.ingest("car.obj", vec![0; 5]).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_ingest_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Roadster.OBJ");
        std::fs::write(&path, b"v 0 0 0\n").unwrap();

        let ingestor = ModelIngestor::new(Arc::new(MemoryModelRepository::new()), 1024);
        let outcome = ingestor.ingest_path(&path).unwrap();
        assert_eq!(outcome.model.file_name, "Roadster.OBJ");
        assert_eq!(outcome.model.format, SupportedFormat::Obj);
        assert!(outcome.persisted);
    }

    #[test]
    fn test_ingest_path_rejects_before_reading() {
        let ingestor = ModelIngestor::new(Arc::new(MemoryModelRepository::new()), 1024);
        // file does not exist; rejection must come from the extension
        let err = ingestor
            .ingest_path(Path::new("/nonexistent/body.step"))
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported model format"));
    }

    #[test]
    fn test_clear_empties_both_slots() {
        let ingestor = ModelIngestor::new(Arc::new(MemoryModelRepository::new()), 1024);
        ingestor.ingest("a.obj", b"v".to_vec()).unwrap();
        ingestor.clear().unwrap();
        assert!(ingestor.current().unwrap().is_none());
    }
}
