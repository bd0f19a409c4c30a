//! AI drag analysis
//!
//! The drag coefficient is not simulated. A completion service is prompted
//! for text in a fixed layout, which [`parse_analysis`] turns into a
//! [`DragAnalysis`], falling back to generated values when the text does not
//! conform.

pub mod analyzer;
pub mod client;
pub mod parser;
pub mod prompt;

pub use analyzer::AeroAnalyzer;
pub use client::{
    AnalysisClient, AnalysisErrorBody, AnalysisRequest, AnalysisResponse, DirectAnalysis,
    RemoteAnalysis,
};
pub use parser::{
    default_improvements, parse_analysis, AnalysisSource, DragAnalysis, DragRating, Impact,
    Improvement,
};
pub use prompt::{analysis_prompt, EMPTY_ANALYSIS_TEXT, SYSTEM_PROMPT, UNAVAILABLE_TEXT};
