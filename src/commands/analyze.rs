//! Drag analysis command

use crate::analysis::{parse_analysis, AeroAnalyzer, DragAnalysis, DragRating, UNAVAILABLE_TEXT};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use prettytable::{format, Table};

/// Analyze the current model, or `file_name` when given
///
/// Provider failures, including missing credentials, still produce a
/// fallback analysis.
///
/// # Errors
///
/// Returns an error if the model store cannot be read or JSON output fails.
pub async fn run(config: &Config, file_name: Option<String>, json: bool) -> Result<()> {
    let file_name = match file_name {
        Some(name) => name,
        None => match super::open_ingestor(config)?.current()? {
            Some(model) => model.file_name,
            None => {
                println!(
                    "{}",
                    "No model uploaded. Use `aerosuite upload <FILE>` first.".yellow()
                );
                return Ok(());
            }
        },
    };

    if !json {
        println!("Running AI aerodynamic analysis for {}...", file_name.cyan());
    }

    let analysis = match super::analysis_client(config) {
        Ok(client) => AeroAnalyzer::new(client).analyze(&file_name).await,
        Err(e) => {
            tracing::warn!("Analysis service unavailable: {}", e);
            parse_analysis(UNAVAILABLE_TEXT, &mut rand::rng())
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

/// Print an analysis as a rating line, summary and improvements table
pub fn print_analysis(analysis: &DragAnalysis) {
    let rating = analysis.rating();
    let rating_text = match rating {
        DragRating::Excellent => rating.to_string().green(),
        DragRating::NeedsImprovement => rating.to_string().yellow(),
    };

    println!();
    println!(
        "Drag coefficient: {}  ({})",
        format!("{:.3}", analysis.drag_coefficient).bold(),
        rating_text
    );
    println!();
    if let Some(summary) = &analysis.summary {
        println!("{}", summary);
        println!();
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Area".bold(),
        "Impact".bold(),
        "Reduction".bold(),
        "Recommendation".bold()
    ]);
    for improvement in &analysis.improvements {
        table.add_row(prettytable::row![
            improvement.area.cyan(),
            improvement.impact,
            improvement.reduction,
            improvement.description
        ]);
    }
    println!("Suggested improvements:");
    table.printstd();
    println!();
}
