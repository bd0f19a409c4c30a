//! CATIA workbench catalog and canned copilot prompts

use serde::Serialize;

/// A CATIA workbench shown in the tools overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatiaTool {
    /// Workbench name
    pub name: &'static str,
    /// Category badge
    pub category: &'static str,
    /// What the workbench is for
    pub description: &'static str,
    /// How it is typically used
    pub usage: &'static str,
    /// Key benefits
    pub benefits: [&'static str; 4],
}

/// The five workbenches in the overview, in display order
pub const CATIA_TOOLS: [CatiaTool; 5] = [
    CatiaTool {
        name: "Part Design Workbench",
        category: "Modeling",
        description: "The Part Design workbench is used for creating solid parts using sketch-based features. It's the foundation for most CATIA modeling work.",
        usage: "Create sketches on planes, then use operations like Pad, Pocket, Shaft, Groove, and more to build 3D geometry from 2D sketches.",
        benefits: [
            "Parametric modeling",
            "Feature-based design",
            "History tree management",
            "Design intent capture",
        ],
    },
    CatiaTool {
        name: "Assembly Design Workbench",
        category: "Assembly",
        description: "Assembly Design allows you to create and manage complex assemblies with multiple parts, constraints, and motion studies.",
        usage: "Insert parts and sub-assemblies, apply constraints (coincidence, contact, offset), create exploded views, and analyze assembly motion.",
        benefits: [
            "Constraint-based assembly",
            "Interference detection",
            "Motion simulation",
            "Bill of materials generation",
        ],
    },
    CatiaTool {
        name: "Generative Shape Design",
        category: "Surface",
        description: "GSD is a powerful surface modeling workbench for creating complex curved surfaces and wireframe geometry.",
        usage: "Create surfaces using sweep, loft, fill, blend operations. Build wireframe elements like splines, curves, and points for advanced geometry.",
        benefits: [
            "Complex surface creation",
            "Class-A surfacing",
            "Wireframe modeling",
            "Advanced curve operations",
        ],
    },
    CatiaTool {
        name: "Sketcher Workbench",
        category: "2D Design",
        description: "The Sketcher is the foundation for creating 2D profiles that serve as the basis for 3D features in Part Design.",
        usage: "Draw lines, arcs, circles, splines. Apply geometric and dimensional constraints to fully define sketch geometry.",
        benefits: [
            "Constraint-based sketching",
            "Parametric 2D design",
            "Geometric relationships",
            "Robust sketch solving",
        ],
    },
    CatiaTool {
        name: "DMU Kinematics",
        category: "Simulation",
        description: "DMU Kinematics allows you to simulate and analyze the motion of mechanical assemblies and mechanisms.",
        usage: "Define joints between parts, create kinematic mechanisms, simulate motion, detect collisions, and generate motion studies.",
        benefits: [
            "Motion simulation",
            "Collision detection",
            "Mechanism analysis",
            "Animation creation",
        ],
    },
];

/// One-click questions offered under the chat input
pub const QUICK_PROMPTS: [&str; 3] = [
    "What are the advanced features of Part Design workbench?",
    "How do I optimize assembly performance in CATIA?",
    "Best practices for surface modeling workflow",
];

/// Greeting that opens every chat session
pub const GREETING: &str = "Hello! I'm your AI-powered CATIA Copilot with Gemini integration. I can help you with CATIA tools, analyze your designs, and provide expert suggestions. You can ask me about any CATIA functionality, upload images for analysis, or get detailed information about specific tools.";

/// Reply when no completion provider is configured
pub const MISSING_KEY_REPLY: &str = "Please enter your Gemini API key to use AI-powered responses. You can get one from Google AI Studio.";

/// Reply when the completion call fails
pub const FAILURE_REPLY: &str =
    "I'm having trouble connecting to the AI service. Please check your API key and try again.";

/// Text recorded for the user when an image is attached
pub const IMAGE_UPLOAD_TEXT: &str = "I've uploaded an image for analysis. Can you help me identify potential improvements or CATIA tools that could be useful?";

/// Instruction sent with an attached image
pub const IMAGE_ANALYSIS_PROMPT: &str = "Analyze this engineering/design image and suggest relevant CATIA tools and workflows that could be used to create or improve this design. Focus on specific CATIA workbenches and features.";

const EXPERT_PREFIX: &str = "You are a CATIA expert assistant. Answer the following question about CATIA tools, workflows, or design optimization: ";

/// Wrap a question in the CATIA expert instruction
///
/// # Examples
///
/// ```
/// use aerosuite::chat::catalog::copilot_prompt;
///
/// assert!(copilot_prompt("What is a Pad?").ends_with("design optimization: What is a Pad?"));
/// ```
pub fn copilot_prompt(question: &str) -> String {
    format!("{}{}", EXPERT_PREFIX, question)
}

/// Follow-up question for a selected workbench
pub fn tool_prompt(tool: &CatiaTool) -> String {
    format!(
        "Tell me more about {} and provide advanced tips for using it effectively",
        tool.name
    )
}

/// Find a workbench by case-insensitive name prefix
pub fn find_tool(query: &str) -> Option<&'static CatiaTool> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    CATIA_TOOLS
        .iter()
        .find(|t| t.name.to_lowercase().starts_with(&query))
}
