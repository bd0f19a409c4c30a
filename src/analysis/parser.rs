//! Parsing of free-form drag analysis text
//!
//! The completion service is asked for a fixed layout:
//!
//! ```text
//! DRAG_COEFFICIENT: 0.29
//! ANALYSIS: Smooth roofline with a blunt front fascia
//! IMPROVEMENTS:
//! 1. Front Splitter | Reduce underbody flow | 0.012
//! 2. ...
//! ```
//!
//! Anything that does not follow it degrades to a randomized coefficient
//! and a fixed set of suggestions. Parsing never fails.

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Coefficients below this are rated excellent
pub const EXCELLENT_THRESHOLD: f64 = 0.35;

/// Relative priority of an improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    /// Large expected gain
    High,
    /// Moderate expected gain
    Medium,
    /// Small expected gain
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// One suggested aerodynamic change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    /// Area of the vehicle
    pub area: String,
    /// Priority
    pub impact: Impact,
    /// What to change
    pub description: String,
    /// Estimated Cd reduction, as reported
    pub reduction: String,
}

impl Improvement {
    fn new(area: &str, impact: Impact, description: &str, reduction: &str) -> Self {
        Self {
            area: area.to_string(),
            impact,
            description: description.to_string(),
            reduction: reduction.to_string(),
        }
    }
}

/// Where the analysis numbers came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Read from the service's text
    Parsed,
    /// Generated because the text did not follow the layout
    Fallback,
}

/// Qualitative drag rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DragRating {
    /// Coefficient below [`EXCELLENT_THRESHOLD`]
    Excellent,
    /// Everything else
    NeedsImprovement,
}

impl fmt::Display for DragRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// Structured drag analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragAnalysis {
    /// Drag coefficient, rounded to three decimals
    pub drag_coefficient: f64,
    /// One-line summary, when the service supplied one
    pub summary: Option<String>,
    /// Suggested changes
    pub improvements: Vec<Improvement>,
    /// Parsed or generated
    pub source: AnalysisSource,
}

impl DragAnalysis {
    /// Rating for the coefficient
    ///
    /// # Examples
    ///
    /// ```
    /// use aerosuite::analysis::{parse_analysis, DragRating};
    ///
    /// let analysis = parse_analysis("DRAG_COEFFICIENT: 0.29\nIMPROVEMENTS:\n", &mut rand::rng());
    /// assert_eq!(analysis.rating(), DragRating::Excellent);
    /// ```
    pub fn rating(&self) -> DragRating {
        if self.drag_coefficient < EXCELLENT_THRESHOLD {
            DragRating::Excellent
        } else {
            DragRating::NeedsImprovement
        }
    }
}

/// Suggestions used when none could be parsed
pub fn default_improvements() -> Vec<Improvement> {
    vec![
        Improvement::new(
            "Front Spoiler",
            Impact::High,
            "Add front air dam to reduce airflow under vehicle",
            "0.025",
        ),
        Improvement::new(
            "Rear Slope",
            Impact::Medium,
            "Reduce rear window angle by 5-8 degrees",
            "0.018",
        ),
        Improvement::new(
            "Side Mirrors",
            Impact::Low,
            "Streamline mirror housings and reduce frontal area",
            "0.008",
        ),
    ]
}

struct Patterns {
    coefficient: Regex,
    summary: Regex,
    block: Regex,
    line: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        coefficient: Regex::new(r"DRAG_COEFFICIENT:\s*([\d.]+)").expect("valid regex"),
        summary: Regex::new(r"ANALYSIS:\s*([^\n]+)").expect("valid regex"),
        block: Regex::new(r"IMPROVEMENTS:\s*([\s\S]+)").expect("valid regex"),
        line: Regex::new(r"\d+\.\s*([^|]+)\s*\|\s*([^|]+)\s*\|\s*([\d.]+)").expect("valid regex"),
    })
}

/// Parse service text into a [`DragAnalysis`]
///
/// When the coefficient and the improvements block are both present the
/// coefficient is taken from the text and each matching improvement line is
/// kept with `Medium` impact; if no line matches the default set is used.
/// Otherwise the coefficient is drawn from `[0.30, 0.45)` using `rng`.
pub fn parse_analysis<R: Rng>(text: &str, rng: &mut R) -> DragAnalysis {
    let p = patterns();

    let coefficient = p
        .coefficient
        .captures(text)
        .and_then(|c| leading_float(&c[1]));
    let block = p.block.captures(text).map(|c| c[1].to_string());
    let summary = p
        .summary
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty());

    match (coefficient, block) {
        (Some(cd), Some(block)) => {
            let improvements: Vec<Improvement> = block
                .trim()
                .lines()
                .filter_map(|line| p.line.captures(line))
                .map(|c| Improvement {
                    area: c[1].trim().to_string(),
                    impact: Impact::Medium,
                    description: c[2].trim().to_string(),
                    reduction: c[3].trim().to_string(),
                })
                .collect();

            let improvements = if improvements.is_empty() {
                default_improvements()
            } else {
                improvements
            };

            DragAnalysis {
                drag_coefficient: round3(cd),
                summary,
                improvements,
                source: AnalysisSource::Parsed,
            }
        }
        _ => {
            tracing::debug!("Analysis text did not match the expected layout, using fallback");
            DragAnalysis {
                drag_coefficient: round3(rng.random_range(0.30..0.45)),
                summary,
                improvements: default_improvements(),
                source: AnalysisSource::Fallback,
            }
        }
    }
}

/// Longest numeric prefix, so `0.29.` reads as `0.29`
fn leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, ch) in s.char_indices() {
        match ch {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    s[..end].parse().ok()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WELL_FORMED: &str = "DRAG_COEFFICIENT: 0.29
ANALYSIS: Clean roofline, turbulent wake behind the rear bumper.
IMPROVEMENTS:
1. Rear Diffuser | Add a three-channel diffuser | 0.012
2. Wheel Covers | Use flat aero covers on all wheels | 0.006
3. Underbody Panel | Close the engine bay from below | 0.009";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_parse_well_formed_text() {
        let analysis = parse_analysis(WELL_FORMED, &mut rng());
        assert_eq!(analysis.source, AnalysisSource::Parsed);
        assert_eq!(analysis.drag_coefficient, 0.29);
        assert_eq!(
            analysis.summary.as_deref(),
            Some("Clean roofline, turbulent wake behind the rear bumper.")
        );
        assert_eq!(analysis.improvements.len(), 3);
        assert_eq!(
            analysis.improvements[0],
            Improvement::new(
                "Rear Diffuser",
                Impact::Medium,
                "Add a three-channel diffuser",
                "0.012"
            )
        );
        assert_eq!(analysis.improvements[2].area, "Underbody Panel");
        assert_eq!(analysis.improvements[2].reduction, "0.009");
        assert!(analysis
            .improvements
            .iter()
            .all(|i| i.impact == Impact::Medium));
    }

    #[test]
    fn test_parse_block_without_matching_lines_uses_defaults() {
        let text = "DRAG_COEFFICIENT: 0.31\nIMPROVEMENTS:\n- make it slipperier";
        let analysis = parse_analysis(text, &mut rng());
        assert_eq!(analysis.source, AnalysisSource::Parsed);
        assert_eq!(analysis.drag_coefficient, 0.31);
        assert_eq!(analysis.improvements, default_improvements());
    }

    #[test]
    fn test_parse_non_conforming_text_falls_back() {
        let analysis = parse_analysis("The car looks fast.", &mut rng());
        assert_eq!(analysis.source, AnalysisSource::Fallback);
        assert_eq!(analysis.improvements, default_improvements());
        assert!((0.30..=0.45).contains(&analysis.drag_coefficient));
    }

    #[test]
    fn test_parse_missing_block_falls_back() {
        let analysis = parse_analysis("DRAG_COEFFICIENT: 0.27\nANALYSIS: ok", &mut rng());
        assert_eq!(analysis.source, AnalysisSource::Fallback);
        assert_eq!(analysis.summary.as_deref(), Some("ok"));
    }

    #[test]
    fn test_fallback_is_rounded_to_three_decimals() {
        let mut rng = rng();
        for _ in 0..50 {
            let cd = parse_analysis("", &mut rng).drag_coefficient;
            assert!(((cd * 1000.0).round() - cd * 1000.0).abs() < 1e-6);
            assert!((0.30..=0.45).contains(&cd));
        }
    }

    #[test]
    fn test_coefficient_rounding() {
        let text = "DRAG_COEFFICIENT: 0.28749\nIMPROVEMENTS:\n";
        assert_eq!(parse_analysis(text, &mut rng()).drag_coefficient, 0.287);
    }

    #[test]
    fn test_coefficient_with_trailing_dot() {
        let text = "DRAG_COEFFICIENT: 0.29.\nIMPROVEMENTS:\n";
        assert_eq!(parse_analysis(text, &mut rng()).drag_coefficient, 0.29);
    }

    #[test]
    fn test_bare_dot_coefficient_falls_back() {
        let text = "DRAG_COEFFICIENT: .\nIMPROVEMENTS:\n1. a | b | 0.1";
        assert_eq!(
            parse_analysis(text, &mut rng()).source,
            AnalysisSource::Fallback
        );
    }

    #[test]
    fn test_rating_threshold() {
        let mut analysis = parse_analysis(WELL_FORMED, &mut rng());
        assert_eq!(analysis.rating(), DragRating::Excellent);
        analysis.drag_coefficient = 0.35;
        assert_eq!(analysis.rating(), DragRating::NeedsImprovement);
        assert_eq!(analysis.rating().to_string(), "Needs Improvement");
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("0.3"), Some(0.3));
        assert_eq!(leading_float("12"), Some(12.0));
        assert_eq!(leading_float("1.2.3"), Some(1.2));
        assert_eq!(leading_float("."), None);
    }
}
