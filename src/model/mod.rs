//! Model ingestion and the current-model slot
//!
//! Uploaded files are checked against the GLB/GLTF/OBJ allow-list, encoded
//! as data URLs, and kept in a single-slot repository.

pub mod data_url;
pub mod format;
pub mod ingest;
pub mod store;
pub mod types;

pub use format::{rejection_hint, SupportedFormat};
pub use ingest::{IngestOutcome, ModelIngestor};
pub use store::{MemoryModelRepository, ModelRepository, SledModelRepository};
pub use types::{StoredModel, UploadedModel, CURRENT_MODEL_ID};
