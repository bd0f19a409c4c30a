/*!
Command handlers for the CLI

Each submodule backs one group of subcommands:

- `model`: upload, current, clear and view of the current model
- `analyze`: AI drag analysis of the current model
- `chat`: CATIA copilot REPL, one-shot questions and the tool catalog
- `report`: static ergonomics, NVH and materials reports
- `serve`: the aero-analysis HTTP function
- `special_commands`: slash-command parser for the chat REPL

The helpers here build the shared components from a loaded [`Config`].
*/

use crate::analysis::{AnalysisClient, DirectAnalysis, RemoteAnalysis};
use crate::config::Config;
use crate::error::{AerosuiteError, Result};
use crate::model::{ModelIngestor, SledModelRepository};
use crate::providers::{create_provider, Provider};
use std::sync::Arc;

pub mod analyze;
pub mod chat;
pub mod model;
pub mod report;
pub mod serve;
pub mod special_commands;

/// Open the durable model store and wrap it in an ingestor
///
/// If the store cannot be opened the ingestor keeps models for this
/// session only.
///
/// # Errors
///
/// Returns an error if the storage path cannot be resolved.
pub fn open_ingestor(config: &Config) -> Result<ModelIngestor> {
    let path = config.storage.resolve_path()?;
    tracing::debug!("Opening model store at {}", path.display());
    match SledModelRepository::new(&path) {
        Ok(repository) => Ok(ModelIngestor::new(
            Arc::new(repository),
            config.storage.max_upload_bytes,
        )),
        Err(e) => {
            tracing::warn!(
                "Model store at {} unavailable, using session-only storage: {}",
                path.display(),
                e
            );
            Ok(ModelIngestor::session_only(
                config.storage.max_upload_bytes,
            ))
        }
    }
}

/// Build the configured completion provider, if credentials are present
///
/// Missing credentials are not an error here: callers degrade to their
/// no-provider behavior. Any other construction failure is returned.
pub fn optional_provider(config: &Config) -> Result<Option<Arc<dyn Provider>>> {
    match create_provider(&config.provider) {
        Ok(provider) => Ok(Some(Arc::from(provider))),
        Err(e) => match e.downcast_ref::<AerosuiteError>() {
            Some(AerosuiteError::MissingCredentials(name)) => {
                tracing::warn!("No API key configured for provider {}", name);
                Ok(None)
            }
            _ => Err(e),
        },
    }
}

/// Build the analysis text source
///
/// A configured `analysis.endpoint` takes precedence over the provider.
///
/// # Errors
///
/// Returns the provider construction error, including missing credentials.
pub fn analysis_client(config: &Config) -> Result<Arc<dyn AnalysisClient>> {
    if let Some(endpoint) = &config.analysis.endpoint {
        tracing::debug!("Using remote aero-analysis endpoint {}", endpoint);
        let remote = RemoteAnalysis::new(
            endpoint.clone(),
            config.analysis.api_key.clone(),
            config.provider.timeout_seconds,
        )?;
        return Ok(Arc::new(remote));
    }

    let provider = create_provider(&config.provider)?;
    Ok(Arc::new(DirectAnalysis::new(Arc::from(provider))))
}
