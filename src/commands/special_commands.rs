//! Special commands parser for the copilot REPL
//!
//! Commands start with `/` and are case-insensitive. `exit` and `quit` work
//! without the slash. Anything else is a question for the copilot.

use crate::chat::catalog::{find_tool, CatiaTool, QUICK_PROMPTS};
use colored::Colorize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// No workbench matches the given name
    #[error("No CATIA tool matches '{0}'\n\nType '/tools' to list them")]
    UnknownTool(String),

    /// Quick prompt index out of range
    #[error("Quick prompt {index} does not exist (choose 1-{max})")]
    QuickPromptOutOfRange { index: usize, max: usize },
}

/// Commands handled by the REPL itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help
    Help,
    /// List the workbench catalog
    ListTools,
    /// Ask the follow-up question for one workbench
    AskTool(&'static CatiaTool),
    /// List the quick prompts
    ListQuickPrompts,
    /// Submit a quick prompt by 1-based index
    Quick(&'static str),
    /// Attach an image for analysis
    Image(PathBuf),
    /// Print the conversation so far
    History,
    /// Leave the REPL
    Exit,
    /// Not a command; send as a question
    None,
}

/// Parse one REPL input line
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands, missing arguments or
/// selections that do not exist.
///
/// # Examples
///
/// ```
/// use aerosuite::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
/// assert_eq!(parse_special_command("What is a Pad?").unwrap(), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((c, a)) => (c.to_lowercase(), a.trim()),
        None => (lower.clone(), ""),
    };

    match command.as_str() {
        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/tools" => Ok(SpecialCommand::ListTools),
        "/history" => Ok(SpecialCommand::History),
        "/tool" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/tool".to_string(),
                    usage: "/tool <name>".to_string(),
                });
            }
            find_tool(arg)
                .map(SpecialCommand::AskTool)
                .ok_or_else(|| CommandError::UnknownTool(arg.to_string()))
        }
        "/quick" => {
            if arg.is_empty() {
                return Ok(SpecialCommand::ListQuickPrompts);
            }
            let max = QUICK_PROMPTS.len();
            let index: usize = arg
                .parse()
                .map_err(|_| CommandError::QuickPromptOutOfRange { index: 0, max })?;
            if index == 0 || index > max {
                return Err(CommandError::QuickPromptOutOfRange { index, max });
            }
            Ok(SpecialCommand::Quick(QUICK_PROMPTS[index - 1]))
        }
        "/image" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/image".to_string(),
                    usage: "/image <path>".to_string(),
                });
            }
            Ok(SpecialCommand::Image(PathBuf::from(arg)))
        }
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Print REPL help
pub fn print_help() {
    println!();
    println!("{}", "CATIA Copilot commands".bold());
    println!("  {}          Show this help", "/help".cyan());
    println!("  {}         List CATIA workbenches", "/tools".cyan());
    println!("  {}   Ask about one workbench", "/tool <name>".cyan());
    println!("  {}         List quick prompts", "/quick".cyan());
    println!("  {}     Ask quick prompt N", "/quick <N>".cyan());
    println!("  {}  Attach an image for analysis", "/image <path>".cyan());
    println!("  {}       Show the conversation", "/history".cyan());
    println!("  {}           Leave the copilot", "exit".cyan());
    println!();
    println!("Anything else is sent to the copilot as a question.");
    println!();
}

/// Print the quick prompts with their indices
pub fn print_quick_prompts() {
    println!();
    for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).cyan(), prompt);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(
            parse_special_command("How do I pad a sketch?").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_exit_variants() {
        for input in ["exit", "QUIT", "/exit", " /quit "] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_tool_lookup_by_prefix() {
        match parse_special_command("/tool generative").unwrap() {
            SpecialCommand::AskTool(tool) => assert!(tool.name.starts_with("Generative")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tool_requires_argument() {
        assert!(matches!(
            parse_special_command("/tool"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_unknown_tool() {
        assert_eq!(
            parse_special_command("/tool solidworks"),
            Err(CommandError::UnknownTool("solidworks".to_string()))
        );
    }

    #[test]
    fn test_quick_prompt_selection() {
        assert_eq!(
            parse_special_command("/quick 2").unwrap(),
            SpecialCommand::Quick(QUICK_PROMPTS[1])
        );
        assert_eq!(
            parse_special_command("/quick").unwrap(),
            SpecialCommand::ListQuickPrompts
        );
        assert!(matches!(
            parse_special_command("/quick 9"),
            Err(CommandError::QuickPromptOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_image_keeps_path_case() {
        assert_eq!(
            parse_special_command("/image Designs/Wing.PNG").unwrap(),
            SpecialCommand::Image(PathBuf::from("Designs/Wing.PNG"))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            parse_special_command("/mode write"),
            Err(CommandError::UnknownCommand(_))
        ));
    }
}
