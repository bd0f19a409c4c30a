//! Static engineering report tables

use crate::cli::ReportKind;
use crate::reports::{ergonomics, materials, nvh, Priority};
use colored::{ColoredString, Colorize};
use prettytable::{format, Table};

/// Print the selected report, or all of them
pub fn run(kind: ReportKind) {
    match kind {
        ReportKind::Ergonomics => print_ergonomics(),
        ReportKind::Nvh => print_nvh(),
        ReportKind::Materials => print_materials(),
        ReportKind::All => {
            print_ergonomics();
            print_nvh();
            print_materials();
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table
}

fn priority(p: Priority) -> ColoredString {
    match p {
        Priority::High => p.to_string().red(),
        Priority::Medium => p.to_string().yellow(),
        Priority::Low => p.to_string().green(),
    }
}

fn print_ergonomics() {
    println!("\n{}", "Ergonomic Analysis".bold().cyan());

    let mut scores = new_table();
    scores.add_row(prettytable::row!["Metric".bold(), "Score".bold(), "Status".bold()]);
    for s in &ergonomics::SCORES {
        scores.add_row(prettytable::row![s.metric, format!("{}%", s.score), s.status]);
    }
    println!("\nHuman Factors Score:");
    scores.printstd();
    println!("Overall: {:.1}%", ergonomics::overall_score());

    let mut fit = new_table();
    fit.add_row(prettytable::row!["Population".bold(), "Fit".bold()]);
    for f in &ergonomics::ANTHROPOMETRIC_FIT {
        fit.add_row(prettytable::row![f.population, f.verdict]);
    }
    println!("\nAnthropometric Fit:");
    fit.printstd();

    let mut recs = new_table();
    recs.add_row(prettytable::row!["Area".bold(), "Suggestion".bold(), "Impact".bold()]);
    for r in &ergonomics::RECOMMENDATIONS {
        recs.add_row(prettytable::row![r.area, r.suggestion, priority(r.impact)]);
    }
    println!("\nRecommendations:");
    recs.printstd();
    println!();
}

fn print_nvh() {
    println!("\n{}", "NVH Analysis".bold().cyan());

    let mut noise = new_table();
    noise.add_row(prettytable::row![
        "Frequency".bold(),
        "Level".bold(),
        "Target".bold(),
        "Status".bold()
    ]);
    for band in &nvh::NOISE_BANDS {
        let status = if band.within_target() {
            band.status().green()
        } else {
            band.status().red()
        };
        noise.add_row(prettytable::row![
            band.frequency,
            format!("{} dB", band.level_db),
            format!("{} dB", band.target_db),
            status
        ]);
    }
    println!("\nNoise Analysis:");
    noise.printstd();

    let mut vibration = new_table();
    vibration.add_row(prettytable::row![
        "Component".bold(),
        "Level".bold(),
        "Threshold".bold(),
        "Status".bold()
    ]);
    for v in &nvh::VIBRATION {
        let status = if v.exceeds_threshold() {
            v.status.red()
        } else {
            v.status.green()
        };
        vibration.add_row(prettytable::row![
            v.component,
            format!("{} m/s²", v.level),
            format!("{} m/s²", v.threshold),
            status
        ]);
    }
    println!("\nVibration Analysis:");
    vibration.printstd();

    let mut solutions = new_table();
    solutions.add_row(prettytable::row![
        "Issue".bold(),
        "Solution".bold(),
        "Reduction".bold(),
        "Cost".bold()
    ]);
    for s in &nvh::SOLUTIONS {
        solutions.add_row(prettytable::row![s.issue, s.solution, s.reduction, priority(s.cost)]);
    }
    println!("\nNVH Optimization Solutions:");
    solutions.printstd();
    println!();
}

fn print_materials() {
    println!("\n{}", "Material Optimization".bold().cyan());

    let mut current = new_table();
    current.add_row(prettytable::row![
        "Component".bold(),
        "Material".bold(),
        "Weight".bold(),
        "Cost".bold(),
        "Sustainability".bold(),
        "Strength".bold()
    ]);
    for m in &materials::CURRENT_MATERIALS {
        current.add_row(prettytable::row![
            m.component,
            m.material,
            format!("{} kg", m.weight_kg),
            format!("${}", m.cost),
            format!("{}%", m.sustainability),
            format!("{}%", m.strength)
        ]);
    }
    println!("\nCurrent Material Analysis:");
    current.printstd();

    let mut alternatives = new_table();
    alternatives.add_row(prettytable::row![
        "Component".bold(),
        "Swap".bold(),
        "Weight".bold(),
        "Cost".bold(),
        "Strength".bold(),
        "Sustainability".bold(),
        "".bold()
    ]);
    for a in &materials::ALTERNATIVES {
        let verdict = if a.recommended {
            "Recommended".green()
        } else {
            "Not recommended".dimmed()
        };
        alternatives.add_row(prettytable::row![
            a.component,
            format!("{} -> {}", a.current, a.alternative),
            format!("-{}", a.weight_saving),
            a.cost_change,
            a.strength_change,
            a.sustainability_change,
            verdict
        ]);
    }
    println!("\nMaterial Alternatives:");
    alternatives.printstd();

    let summary = materials::summary();
    println!("\nSummary:");
    println!("  Total weight:       {} kg", summary.total_weight_kg);
    println!("  Material cost:      ${}", summary.total_cost);
    println!(
        "  Sustainability:     {:.0}%",
        summary.average_sustainability
    );
    println!("  Efficiency grade:   {}", summary.efficiency_grade.bold());
    println!();
}
