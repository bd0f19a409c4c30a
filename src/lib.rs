//! Aerosuite - automotive CFD design-review assistant library
//!
//! This library provides model ingestion and persistence, scene decoding and
//! normalization for viewing, AI drag analysis, the CATIA copilot chat, and
//! the static engineering reports.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `model`: Format allow-list, upload validation and the current-model store
//! - `scene`: GLB/GLTF/OBJ decoding, normalization and viewer state
//! - `analysis`: Drag analysis prompt, clients and response parsing
//! - `chat`: CATIA copilot session, tool catalog and image attachments
//! - `providers`: Completion service abstraction (AI gateway, Gemini)
//! - `reports`: Static ergonomics, NVH and materials data
//! - `server`: HTTP aero-analysis function
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use aerosuite::model::{ModelIngestor, SledModelRepository};
//! use aerosuite::scene::render;
//! use aerosuite::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let repository = SledModelRepository::new(config.storage.resolve_path()?)?;
//!     let ingestor = ModelIngestor::new(Arc::new(repository), config.storage.max_upload_bytes);
//!     let outcome = ingestor.ingest_path(std::path::Path::new("car.glb"))?;
//!
//!     let state = render(&outcome.model.payload, outcome.model.format, &config.viewer);
//!     println!("ready: {}", state.is_ready());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod reports;
pub mod scene;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{AerosuiteError, Result};
pub use model::{SupportedFormat, UploadedModel};
pub use scene::ViewerState;

#[cfg(test)]
pub mod test_utils;
