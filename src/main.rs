//! Aerosuite - automotive CFD design-review assistant CLI
//!
#![doc = "Aerosuite - automotive CFD design-review assistant CLI"]
#![doc = "Main entry point for the aerosuite application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aerosuite::cli::{Cli, Commands};
use aerosuite::commands;
use aerosuite::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    init_tracing(cli.verbose, config.logging.json);
    if !std::path::Path::new(config_path).exists() {
        tracing::warn!("Config file not found at {}, using defaults", config_path);
    }

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Upload { file, no_analyze } => {
            tracing::info!("Uploading model {}", file.display());
            commands::model::upload(&config, &file, no_analyze).await
        }
        Commands::Current { json } => commands::model::current(&config, json),
        Commands::Clear => {
            tracing::info!("Clearing current model");
            commands::model::clear(&config)
        }
        Commands::View { json } => commands::model::view(&config, json),
        Commands::Analyze { file_name, json } => {
            tracing::info!("Starting drag analysis");
            commands::analyze::run(&config, file_name, json).await
        }
        Commands::Chat { image } => {
            tracing::info!("Starting CATIA copilot chat");
            commands::chat::run_chat(&config, image).await
        }
        Commands::Ask { question, image } => commands::chat::ask(&config, question, image).await,
        Commands::Tools => {
            commands::chat::list_tools();
            Ok(())
        }
        Commands::Report { kind } => {
            commands::report::run(kind);
            Ok(())
        }
        Commands::Serve { bind } => {
            tracing::info!("Starting analysis server");
            commands::serve::run(&config, bind).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins when set; otherwise `aerosuite=info`, or `aerosuite=debug`
/// with `--verbose`. Logs are written to stderr.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "aerosuite=debug"
    } else {
        "aerosuite=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
