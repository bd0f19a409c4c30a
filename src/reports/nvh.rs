//! Noise, vibration and harshness panel data

use super::Priority;
use serde::Serialize;

/// Sound pressure in one frequency band
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NoiseBand {
    /// Frequency range label
    pub frequency: &'static str,
    /// Measured level (dB)
    pub level_db: f64,
    /// Target level (dB)
    pub target_db: f64,
}

impl NoiseBand {
    /// Whether the band meets its target
    pub fn within_target(&self) -> bool {
        self.level_db <= self.target_db
    }

    /// Status label
    pub fn status(&self) -> &'static str {
        if self.within_target() {
            "Within Target"
        } else {
            "Over Target"
        }
    }
}

/// Vibration at one component
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VibrationReading {
    /// Component name
    pub component: &'static str,
    /// Measured level (m/s²)
    pub level: f64,
    /// Acceptable threshold (m/s²)
    pub threshold: f64,
    /// Status label
    pub status: &'static str,
}

impl VibrationReading {
    /// Whether the reading exceeds its threshold
    pub fn exceeds_threshold(&self) -> bool {
        self.level > self.threshold
    }
}

/// Proposed NVH countermeasure
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NvhSolution {
    /// Observed issue
    pub issue: &'static str,
    /// Countermeasure
    pub solution: &'static str,
    /// Expected reduction
    pub reduction: &'static str,
    /// Relative cost
    pub cost: Priority,
}

/// Sound pressure by frequency band
pub const NOISE_BANDS: [NoiseBand; 4] = [
    NoiseBand {
        frequency: "50-200 Hz",
        level_db: 45.0,
        target_db: 40.0,
    },
    NoiseBand {
        frequency: "200-500 Hz",
        level_db: 38.0,
        target_db: 42.0,
    },
    NoiseBand {
        frequency: "500-2000 Hz",
        level_db: 52.0,
        target_db: 48.0,
    },
    NoiseBand {
        frequency: "2000+ Hz",
        level_db: 35.0,
        target_db: 38.0,
    },
];

/// Vibration readings
pub const VIBRATION: [VibrationReading; 4] = [
    VibrationReading {
        component: "Engine Mount",
        level: 0.8,
        threshold: 1.0,
        status: "Good",
    },
    VibrationReading {
        component: "Suspension",
        level: 1.2,
        threshold: 1.0,
        status: "Elevated",
    },
    VibrationReading {
        component: "Drivetrain",
        level: 0.6,
        threshold: 0.8,
        status: "Excellent",
    },
    VibrationReading {
        component: "Body Panel",
        level: 0.9,
        threshold: 0.7,
        status: "High",
    },
];

/// Countermeasures
pub const SOLUTIONS: [NvhSolution; 3] = [
    NvhSolution {
        issue: "Engine Noise at 150Hz",
        solution: "Add acoustic barrier in firewall",
        reduction: "8 dB",
        cost: Priority::Medium,
    },
    NvhSolution {
        issue: "Road Noise Intrusion",
        solution: "Improve door seal design",
        reduction: "5 dB",
        cost: Priority::Low,
    },
    NvhSolution {
        issue: "Suspension Vibration",
        solution: "Optimize bushing durometer",
        reduction: "15%",
        cost: Priority::Low,
    },
];
