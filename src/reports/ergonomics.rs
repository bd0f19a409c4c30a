//! Ergonomics panel data

use super::Priority;
use serde::Serialize;

/// Human-factors score for one metric, in percent
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErgonomicScore {
    /// Metric name
    pub metric: &'static str,
    /// Score out of 100
    pub score: u8,
    /// Status label
    pub status: &'static str,
}

/// Fit result for an occupant population
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnthropometricFit {
    /// Population
    pub population: &'static str,
    /// Fit verdict
    pub verdict: &'static str,
}

/// Suggested ergonomic change
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErgonomicRecommendation {
    /// Area of the cabin
    pub area: &'static str,
    /// What to change
    pub suggestion: &'static str,
    /// Priority
    pub impact: Priority,
}

/// Scores based on SAE human-factors guidelines
pub const SCORES: [ErgonomicScore; 4] = [
    ErgonomicScore {
        metric: "Driver Visibility",
        score: 85,
        status: "Good",
    },
    ErgonomicScore {
        metric: "Seat Comfort",
        score: 92,
        status: "Excellent",
    },
    ErgonomicScore {
        metric: "Control Reach",
        score: 78,
        status: "Adequate",
    },
    ErgonomicScore {
        metric: "Entry/Exit Ease",
        score: 71,
        status: "Needs Work",
    },
];

/// 5th to 95th percentile fit
pub const ANTHROPOMETRIC_FIT: [AnthropometricFit; 3] = [
    AnthropometricFit {
        population: "95th Percentile Male",
        verdict: "Compatible",
    },
    AnthropometricFit {
        population: "5th Percentile Female",
        verdict: "Marginal",
    },
    AnthropometricFit {
        population: "Wheelchair Access",
        verdict: "Not Assessed",
    },
];

/// Recommended changes
pub const RECOMMENDATIONS: [ErgonomicRecommendation; 3] = [
    ErgonomicRecommendation {
        area: "Dashboard Layout",
        suggestion: "Relocate climate controls 2cm closer to driver",
        impact: Priority::Medium,
    },
    ErgonomicRecommendation {
        area: "Seat Position",
        suggestion: "Adjust lumbar support angle by 3 degrees",
        impact: Priority::High,
    },
    ErgonomicRecommendation {
        area: "Mirror Positioning",
        suggestion: "Optimize blind spot coverage with wider mirrors",
        impact: Priority::High,
    },
];

/// Mean of all scores
pub fn overall_score() -> f64 {
    SCORES.iter().map(|s| f64::from(s.score)).sum::<f64>() / SCORES.len() as f64
}
