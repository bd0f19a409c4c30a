//! Current-model commands: upload, current, clear and view

use crate::config::Config;
use crate::error::Result;
use crate::model::UploadedModel;
use crate::scene::{render, ViewerState};
use colored::Colorize;
use prettytable::{format, Table};
use serde_json::json;
use std::path::Path;

/// Validate and store a model file as the current model
///
/// Runs the drag analysis afterwards unless `no_analyze` is set.
///
/// # Errors
///
/// Returns the rejection error for unsupported, empty or oversized files.
pub async fn upload(config: &Config, file: &Path, no_analyze: bool) -> Result<()> {
    let ingestor = super::open_ingestor(config)?;
    let outcome = ingestor.ingest_path(file)?;
    let model = &outcome.model;

    println!(
        "{} {} ({}, {})",
        "Uploaded".green(),
        model.file_name.cyan(),
        model.format,
        format_size(model.size_bytes())
    );
    if !outcome.persisted {
        println!(
            "{}",
            "Warning: the model could not be saved and is available for this session only."
                .yellow()
        );
    }

    if no_analyze {
        return Ok(());
    }

    println!();
    super::analyze::run(config, Some(model.file_name.clone()), false).await
}

/// Print the current model record
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn current(config: &Config, json: bool) -> Result<()> {
    let ingestor = super::open_ingestor(config)?;
    let Some(model) = ingestor.current()? else {
        if json {
            println!("null");
        } else {
            println!("{}", "No model uploaded.".yellow());
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&model_summary(&model))?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["File".bold(), model.file_name.cyan()]);
    table.add_row(prettytable::row!["Format".bold(), model.format]);
    table.add_row(prettytable::row![
        "Size".bold(),
        format_size(model.size_bytes())
    ]);
    table.add_row(prettytable::row![
        "Uploaded".bold(),
        model.persisted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ]);
    table.add_row(prettytable::row!["SHA-256".bold(), &model.sha256[..16]]);

    println!("\nCurrent Model:");
    table.printstd();
    println!();
    Ok(())
}

/// Remove the current model
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn clear(config: &Config) -> Result<()> {
    let ingestor = super::open_ingestor(config)?;
    ingestor.clear()?;
    println!("{}", "Current model cleared.".green());
    Ok(())
}

/// Decode and normalize the current model
///
/// A model that cannot be decoded produces the fallback placeholder, not an
/// error.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn view(config: &Config, json: bool) -> Result<()> {
    let ingestor = super::open_ingestor(config)?;
    let Some(model) = ingestor.current()? else {
        println!(
            "{}",
            "No model uploaded. Use `aerosuite upload <FILE>` first.".yellow()
        );
        return Ok(());
    };

    let state = render(&model.payload, model.format, &config.viewer);
    if json {
        println!("{}", serde_json::to_string_pretty(&viewer_summary(&state))?);
        return Ok(());
    }

    match &state {
        ViewerState::Ready {
            scene,
            camera,
            lighting,
            stats,
        } => {
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
            table.add_row(prettytable::row!["Meshes".bold(), stats.meshes]);
            table.add_row(prettytable::row!["Vertices".bold(), stats.vertices]);
            table.add_row(prettytable::row!["Triangles".bold(), stats.triangles]);
            table.add_row(prettytable::row![
                "Source size".bold(),
                format_vec(scene.source_bounds.size())
            ]);
            table.add_row(prettytable::row![
                "Normalized size".bold(),
                format_vec(scene.bounds.size())
            ]);
            table.add_row(prettytable::row!["Scale".bold(), format!("{:.4}", scene.scale)]);
            table.add_row(prettytable::row![
                "Camera".bold(),
                format!(
                    "{} fov {}°",
                    format_vec(camera.position),
                    camera.fov_degrees
                )
            ]);
            table.add_row(prettytable::row![
                "Lighting".bold(),
                format!(
                    "ambient {} + directional {} @ {}",
                    lighting.ambient_intensity,
                    lighting.directional_intensity,
                    format_vec(lighting.directional_position)
                )
            ]);

            println!("\n{} {}", "Viewer ready:".green(), model.file_name.cyan());
            table.printstd();
            println!();
        }
        ViewerState::Fallback { shape, message } => {
            println!("{}", message.red());
            println!("Showing placeholder {:?} instead.", shape);
        }
    }
    Ok(())
}

fn model_summary(model: &UploadedModel) -> serde_json::Value {
    json!({
        "fileName": model.file_name,
        "fileType": model.format,
        "sizeBytes": model.size_bytes(),
        "sha256": model.sha256,
        "timestamp": model.persisted_at,
    })
}

fn viewer_summary(state: &ViewerState) -> serde_json::Value {
    match state {
        ViewerState::Ready {
            scene,
            camera,
            lighting,
            stats,
        } => json!({
            "state": "ready",
            "stats": stats,
            "sourceBounds": scene.source_bounds,
            "bounds": scene.bounds,
            "scale": scene.scale,
            "offset": scene.offset,
            "camera": camera,
            "lighting": lighting,
        }),
        ViewerState::Fallback { .. } => serde_json::to_value(state).unwrap_or_default(),
    }
}

fn format_vec(v: [f32; 3]) -> String {
    format!("[{:.3}, {:.3}, {:.3}]", v[0], v[1], v[2])
}

fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < KIB * KIB {
        format!("{:.1} KiB", bytes / KIB)
    } else {
        format!("{:.1} MiB", bytes / (KIB * KIB))
    }
}
