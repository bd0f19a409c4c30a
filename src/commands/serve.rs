//! Aero-analysis HTTP function command

use crate::analysis::DirectAnalysis;
use crate::config::Config;
use crate::error::Result;
use crate::providers::create_provider;
use std::sync::Arc;

/// Serve `/aero-analysis` backed by the configured provider
///
/// The server always calls the provider directly; `analysis.endpoint` is
/// ignored so a server never forwards to itself.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the address cannot
/// be bound.
pub async fn run(config: &Config, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let provider = create_provider(&config.provider)?;
    tracing::info!(
        provider = provider.name(),
        model = provider.model(),
        "Starting aero-analysis function"
    );
    let client = Arc::new(DirectAnalysis::new(Arc::from(provider)));
    crate::server::serve(&bind, client).await
}
