//! Prompt text for the drag analysis request

/// System instruction sent with every analysis request
pub const SYSTEM_PROMPT: &str =
    "You are an expert aerodynamics engineer specializing in automotive design and CFD analysis.";

/// Returned by the analysis function when the service sends no content
pub const EMPTY_ANALYSIS_TEXT: &str =
    "I apologize, but I couldn't generate an analysis. Please try again.";

/// Used in place of the analysis text when the request fails
pub const UNAVAILABLE_TEXT: &str =
    "I'm having trouble processing your request right now. Please try again.";

/// Build the user prompt for a model file
///
/// # Examples
///
/// ```
/// use aerosuite::analysis::analysis_prompt;
///
/// let prompt = analysis_prompt("roadster.glb");
/// assert!(prompt.contains("\"roadster.glb\""));
/// assert!(prompt.contains("DRAG_COEFFICIENT: [number]"));
/// ```
pub fn analysis_prompt(file_name: &str) -> String {
    format!(
        r#"You are an expert aerodynamics engineer analyzing a 3D car model file named "{file_name}".

Provide a detailed aerodynamic analysis with:
1. Estimated drag coefficient (Cd) - provide a realistic value between 0.25 and 0.35
2. Brief analysis of aerodynamic characteristics
3. Three specific improvement suggestions with estimated Cd reduction for each

Format your response EXACTLY as follows:
DRAG_COEFFICIENT: [number]
ANALYSIS: [brief analysis text]
IMPROVEMENTS:
1. [improvement title] | [description] | [estimated Cd reduction]
2. [improvement title] | [description] | [estimated Cd reduction]
3. [improvement title] | [description] | [estimated Cd reduction]"#
    )
}
