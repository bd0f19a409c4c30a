//! Static engineering panels
//!
//! Ergonomics, NVH and material figures are fixed demonstration data. Only
//! the aggregates and status labels derived from them are computed.

pub mod ergonomics;
pub mod materials;
pub mod nvh;

use serde::Serialize;
use std::fmt;

/// Low/Medium/High label used for impact and cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    /// High
    High,
    /// Medium
    Medium,
    /// Low
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        write!(f, "{}", s)
    }
}
