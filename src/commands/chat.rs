//! Copilot chat handlers
//!
//! `run_chat` drives a readline loop over a [`CopilotSession`]; `ask` submits
//! one question or image and prints the reply; `list_tools` prints the
//! workbench catalog.

use super::special_commands::{
    parse_special_command, print_help, print_quick_prompts, SpecialCommand,
};
use crate::chat::catalog::tool_prompt;
use crate::chat::{ChatMessage, ChatRole, CopilotSession, CATIA_TOOLS};
use crate::config::Config;
use crate::error::{AerosuiteError, Result};
use colored::Colorize;
use prettytable::{format, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};

/// Start the interactive copilot
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `image` - Optional image to analyze before the first prompt
///
/// # Errors
///
/// Returns an error if the provider cannot be built for a reason other than
/// missing credentials, or if the terminal editor fails.
pub async fn run_chat(config: &Config, image: Option<PathBuf>) -> Result<()> {
    let provider = super::optional_provider(config)?;
    let mut session = CopilotSession::new(provider);
    let mut rl = DefaultEditor::new()
        .map_err(|e| AerosuiteError::Config(format!("Failed to start line editor: {}", e)))?;

    print_welcome_banner(&session);

    if let Some(path) = image {
        submit_image(&mut session, &path).await;
    }

    loop {
        match rl.readline(&format!("{} ", "catia>".cyan())) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match parse_special_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e.to_string().red());
                        continue;
                    }
                };

                match command {
                    SpecialCommand::Help => print_help(),
                    SpecialCommand::ListTools => print_tools_table(),
                    SpecialCommand::ListQuickPrompts => print_quick_prompts(),
                    SpecialCommand::History => print_history(&session),
                    SpecialCommand::Image(path) => submit_image(&mut session, &path).await,
                    SpecialCommand::AskTool(tool) => {
                        submit_text(&mut session, &tool_prompt(tool)).await
                    }
                    SpecialCommand::Quick(prompt) => {
                        println!("{} {}", "You:".bold(), prompt);
                        submit_text(&mut session, prompt).await
                    }
                    SpecialCommand::Exit => break,
                    SpecialCommand::None => submit_text(&mut session, trimmed).await,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Readline error: {}", e);
                break;
            }
        }
    }

    tracing::info!(messages = session.log().len(), "Copilot session ended");
    println!("Goodbye!");
    Ok(())
}

/// Ask one question, or analyze one image, and print the reply
///
/// # Errors
///
/// Returns `Config` if neither a question nor an image was given, or the
/// image error if the file is not a readable image.
pub async fn ask(config: &Config, question: Option<String>, image: Option<PathBuf>) -> Result<()> {
    let provider = super::optional_provider(config)?;
    let mut session = CopilotSession::new(provider);

    let reply = match (image, question) {
        (Some(path), _) => session.submit_image(&path).await?,
        (None, Some(question)) => match session.submit(&question).await {
            Some(reply) => reply,
            None => {
                return Err(AerosuiteError::Config("Question must not be empty".into()).into())
            }
        },
        (None, None) => {
            return Err(
                AerosuiteError::Config("Provide a question or --image <PATH>".into()).into(),
            )
        }
    };

    println!("{}", reply.text);
    Ok(())
}

/// Print the workbench catalog
pub fn list_tools() {
    print_tools_table();
    for tool in &CATIA_TOOLS {
        println!("{} {}", tool.name.bold().cyan(), format!("[{}]", tool.category).dimmed());
        println!("  {}", tool.description);
        println!("  {} {}", "Usage:".bold(), tool.usage);
        println!("  {} {}", "Benefits:".bold(), tool.benefits.join(", "));
        println!();
    }
}

fn print_tools_table() {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["Workbench".bold(), "Category".bold()]);
    for tool in &CATIA_TOOLS {
        table.add_row(prettytable::row![tool.name.cyan(), tool.category]);
    }
    println!("\nCATIA Tools Overview:");
    table.printstd();
    println!();
}

async fn submit_text(session: &mut CopilotSession, text: &str) {
    if let Some(reply) = session.submit(text).await {
        print_reply(reply);
    }
}

async fn submit_image(session: &mut CopilotSession, path: &Path) {
    println!("{} {}", "Attaching".dimmed(), path.display());
    match session.submit_image(path).await {
        Ok(reply) => print_reply(reply),
        Err(e) => println!("{}", format!("Could not attach image: {}", e).red()),
    }
}

fn print_reply(message: &ChatMessage) {
    println!();
    println!("{} {}", "Copilot:".green().bold(), message.text);
    println!();
}

fn print_history(session: &CopilotSession) {
    println!();
    for message in session.log().messages() {
        let who = match message.role {
            ChatRole::User => "You".bold(),
            ChatRole::Assistant => "Copilot".green().bold(),
        };
        let time = message.timestamp.format("%H:%M:%S");
        let image = if message.image.is_some() { " [image]" } else { "" };
        println!("{} {}{}: {}", format!("[{}]", time).dimmed(), who, image, message.text);
    }
    println!();
}

fn print_welcome_banner(session: &CopilotSession) {
    println!();
    println!("{}", "CATIA Copilot".bold().cyan());
    if let Some(greeting) = session.log().last() {
        println!("{}", greeting.text);
    }
    if !session.has_provider() {
        println!(
            "{}",
            "No API key configured; set AEROSUITE_GATEWAY_API_KEY or AEROSUITE_GEMINI_API_KEY."
                .yellow()
        );
    }
    println!("Type {} for commands.", "/help".cyan());
    println!();
}
