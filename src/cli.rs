//! Command-line interface definition for Aerosuite
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for model upload and viewing, drag analysis,
//! the CATIA copilot chat, static reports, and the analysis server.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Aerosuite - automotive CFD design-review assistant
///
/// Upload a GLB/GLTF/OBJ car model, inspect its normalized scene,
/// request an AI drag analysis, and chat with the CATIA copilot.
#[derive(Parser, Debug, Clone)]
#[command(name = "aerosuite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml", global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the provider from config (gateway, gemini)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Override the model storage directory
    #[arg(long, global = true)]
    pub storage_path: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Aerosuite
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Upload a 3D model (GLB, GLTF or OBJ) as the current model
    Upload {
        /// Model file to upload
        file: PathBuf,

        /// Skip the drag analysis that normally follows an upload
        #[arg(long)]
        no_analyze: bool,
    },

    /// Show the current model record
    Current {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Remove the current model
    Clear,

    /// Decode and normalize the current model for viewing
    View {
        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Run the AI drag analysis for the current model
    Analyze {
        /// Analyze this file name instead of the current model's
        #[arg(long)]
        file_name: Option<String>,

        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive CATIA copilot chat
    Chat {
        /// Open the session by asking for an analysis of this image
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Ask the CATIA copilot a single question
    Ask {
        /// Question text
        question: Option<String>,

        /// Attach an image for analysis instead of asking a question
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// List the CATIA workbench catalog
    Tools,

    /// Print a static engineering report
    Report {
        /// Which report to print
        #[arg(value_enum, default_value_t = ReportKind::All)]
        kind: ReportKind,
    },

    /// Serve the aero-analysis function over HTTP
    Serve {
        /// Socket address to bind (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

/// Static report selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Ergonomic scores and recommendations
    Ergonomics,
    /// Noise and vibration analysis
    Nvh,
    /// Material breakdown and alternatives
    Materials,
    /// All reports
    All,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            provider: None,
            storage_path: None,
            command: Commands::Tools,
        }
    }
}
