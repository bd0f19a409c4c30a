//! Material optimization panel data

use serde::Serialize;

/// Current material of one component
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MaterialUsage {
    /// Component name
    pub component: &'static str,
    /// Material
    pub material: &'static str,
    /// Mass (kg)
    pub weight_kg: u32,
    /// Cost (USD)
    pub cost: u32,
    /// Sustainability score out of 100
    pub sustainability: u32,
    /// Strength score out of 100
    pub strength: u32,
}

/// Candidate replacement material
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MaterialAlternative {
    /// Component name
    pub component: &'static str,
    /// Current material
    pub current: &'static str,
    /// Proposed material
    pub alternative: &'static str,
    /// Weight saving
    pub weight_saving: &'static str,
    /// Cost change
    pub cost_change: &'static str,
    /// Strength change
    pub strength_change: &'static str,
    /// Sustainability change
    pub sustainability_change: &'static str,
    /// Whether the swap is recommended
    pub recommended: bool,
}

/// Aggregates across the current materials
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialSummary {
    /// Total mass (kg)
    pub total_weight_kg: u32,
    /// Total cost (USD)
    pub total_cost: u32,
    /// Mean sustainability score
    pub average_sustainability: f64,
    /// Overall efficiency grade
    pub efficiency_grade: &'static str,
}

/// Current bill of materials
pub const CURRENT_MATERIALS: [MaterialUsage; 4] = [
    MaterialUsage {
        component: "Body Panels",
        material: "Steel",
        weight_kg: 450,
        cost: 1200,
        sustainability: 65,
        strength: 85,
    },
    MaterialUsage {
        component: "Hood",
        material: "Aluminum",
        weight_kg: 25,
        cost: 450,
        sustainability: 78,
        strength: 72,
    },
    MaterialUsage {
        component: "Interior Trim",
        material: "ABS Plastic",
        weight_kg: 15,
        cost: 200,
        sustainability: 45,
        strength: 60,
    },
    MaterialUsage {
        component: "Bumper",
        material: "Polypropylene",
        weight_kg: 8,
        cost: 150,
        sustainability: 55,
        strength: 65,
    },
];

/// Evaluated swaps
pub const ALTERNATIVES: [MaterialAlternative; 3] = [
    MaterialAlternative {
        component: "Body Panels",
        current: "Steel",
        alternative: "Carbon Fiber",
        weight_saving: "65%",
        cost_change: "+180%",
        strength_change: "+25%",
        sustainability_change: "-15%",
        recommended: false,
    },
    MaterialAlternative {
        component: "Body Panels",
        current: "Steel",
        alternative: "Advanced High-Strength Steel",
        weight_saving: "15%",
        cost_change: "+25%",
        strength_change: "+40%",
        sustainability_change: "+10%",
        recommended: true,
    },
    MaterialAlternative {
        component: "Interior Trim",
        current: "ABS Plastic",
        alternative: "Bio-based Composite",
        weight_saving: "20%",
        cost_change: "+15%",
        strength_change: "+10%",
        sustainability_change: "+45%",
        recommended: true,
    },
];

/// Totals and averages over [`CURRENT_MATERIALS`]
pub fn summary() -> MaterialSummary {
    let total_weight_kg = CURRENT_MATERIALS.iter().map(|m| m.weight_kg).sum();
    let total_cost = CURRENT_MATERIALS.iter().map(|m| m.cost).sum();
    let average_sustainability = CURRENT_MATERIALS
        .iter()
        .map(|m| f64::from(m.sustainability))
        .sum::<f64>()
        / CURRENT_MATERIALS.len() as f64;

    MaterialSummary {
        total_weight_kg,
        total_cost,
        average_sustainability,
        efficiency_grade: "B+",
    }
}

/// Alternatives marked as recommended
pub fn recommended_alternatives() -> impl Iterator<Item = &'static MaterialAlternative> {
    ALTERNATIVES.iter().filter(|a| a.recommended)
}
