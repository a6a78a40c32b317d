//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the API.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the conversation history.
    Clear,

    /// Remove one message by id.
    Remove(String),

    /// Change the model.
    Model(String),

    /// Set the sampling temperature.
    Temperature(f64),

    /// Reset the sampling temperature to the default.
    ResetTemperature,

    /// Queue a file to attach to the next message.
    Attach(String),

    /// List the queued attachments.
    Attachments,

    /// Drop all queued attachments.
    Detach,

    /// Display session statistics (message count, current model, etc.).
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use palaver::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/model deepseek-chat").is_some());
/// assert!(parse_command("Hello there!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "remove" => match argument {
            Some(id) => ChatCommand::Remove(id.to_string()),
            None => ChatCommand::Invalid("/remove requires a message id".to_string()),
        },
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model name".to_string()),
        },
        "temperature" => match argument {
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) => ChatCommand::Temperature(value),
                Err(_) => {
                    ChatCommand::Invalid(format!("/temperature requires a number, got {raw}"))
                }
            },
            None => ChatCommand::ResetTemperature,
        },
        "attach" => match argument {
            Some(path) => ChatCommand::Attach(path.to_string()),
            None => ChatCommand::Invalid("/attach requires a file path".to_string()),
        },
        "attachments" => ChatCommand::Attachments,
        "detach" => ChatCommand::Detach,
        "stats" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("unknown command: /{command}")),
    };

    Some(result)
}

/// Returns the help text listing all commands.
pub fn help_text() -> &'static str {
    "Available commands:
  /help              Show this help
  /clear             Clear conversation history
  /remove <id>       Remove one message by id
  /model <name>      Change the model
  /temperature <v>   Set sampling temperature (no value resets)
  /attach <path>     Attach a file to the next message
  /attachments       List queued attachments
  /detach            Drop queued attachments
  /stats             Show session statistics
  /quit              Exit"
}
