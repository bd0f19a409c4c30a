//! CATIA copilot chat
//!
//! A [`CopilotSession`] keeps the append-only message log and asks an
//! optional completion provider for replies. The workbench catalog and the
//! canned prompts live in [`catalog`].

pub mod catalog;
pub mod image;
pub mod session;

pub use catalog::{find_tool, tool_prompt, CatiaTool, CATIA_TOOLS, QUICK_PROMPTS};
pub use session::{ChatLog, ChatMessage, ChatRole, CopilotSession};
