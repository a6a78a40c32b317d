//! Interactive chat application over a completion endpoint.
//!
//! This binary provides a REPL for chatting with an OpenAI-compatible
//! completion endpoint, with a conversation history persisted to disk.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings (reads PALAVER_API_KEY)
//! palaver-chat
//!
//! # Specify a model and endpoint
//! palaver-chat --model deepseek-chat --base-url https://api.deepseek.com/v1
//!
//! # Keep history somewhere specific
//! palaver-chat --history ~/chats/work.json
//!
//! # Disable colors (useful for piping output)
//! palaver-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/remove <id>` - Remove one message by id
//! - `/model <name>` - Change the model
//! - `/temperature <v>` - Set the sampling temperature
//! - `/attach <path>` - Attach a file to the next message
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use uuid::Uuid;

use palaver::chat::{ChatArgs, ChatCommand, ChatSession, help_text, parse_command};
use palaver::config::DEFAULT_TEMPERATURE;
use palaver::{Client, ConversationStore, FileAttachment, LastMessageSlot};

const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

/// Main entry point for the palaver-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("palaver-chat [OPTIONS]");
    let settings = args.resolve()?;
    let use_color = settings.use_color;

    let client = Client::new(settings.client)?;
    let store = ConversationStore::open(&settings.history_path)
        .with_last_message_slot(LastMessageSlot::at(&settings.slot_path));
    let mut session = ChatSession::new(client, store);
    let mut rl = DefaultEditor::new()?;

    // Requests cannot be cancelled once issued; the flag only lets us tell
    // the user that after the fact.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("palaver chat (model: {})", session.model());
    if session.message_count() > 0 {
        println!(
            "Restored {} message(s) from {}",
            session.message_count(),
            session.history_path().display()
        );
    }
    println!("Type /help for commands, /quit to exit\n");

    let mut pending: Vec<FileAttachment> = Vec::new();

    loop {
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => match session.clear() {
                            Ok(()) => print_info(use_color, "Conversation cleared."),
                            Err(err) => print_error(use_color, &err.to_string()),
                        },
                        ChatCommand::Remove(raw_id) => match raw_id.parse::<Uuid>() {
                            Ok(id) => match session.remove(id) {
                                Ok(true) => print_info(use_color, "Message removed."),
                                Ok(false) => print_info(use_color, "No message with that id."),
                                Err(err) => print_error(use_color, &err.to_string()),
                            },
                            Err(_) => {
                                print_error(use_color, &format!("not a message id: {raw_id}"))
                            }
                        },
                        ChatCommand::Model(model) => {
                            session.set_model(&model);
                            print_info(use_color, &format!("Model changed to: {model}"));
                        }
                        ChatCommand::Temperature(value) => {
                            session.set_temperature(value);
                            print_info(use_color, &format!("temperature set to {value:.2}"));
                        }
                        ChatCommand::ResetTemperature => {
                            session.set_temperature(DEFAULT_TEMPERATURE);
                            print_info(
                                use_color,
                                &format!("temperature reset to {DEFAULT_TEMPERATURE:.2}"),
                            );
                        }
                        ChatCommand::Attach(path) => match FileAttachment::from_path(&path) {
                            Ok(attachment) => {
                                print_info(
                                    use_color,
                                    &format!(
                                        "Attached {} ({}, {} bytes)",
                                        attachment.file_name,
                                        attachment.mime_type,
                                        attachment.len()
                                    ),
                                );
                                pending.push(attachment);
                            }
                            Err(err) => print_error(use_color, &err.to_string()),
                        },
                        ChatCommand::Attachments => {
                            if pending.is_empty() {
                                print_info(use_color, "No attachments queued.");
                            } else {
                                for attachment in &pending {
                                    println!(
                                        "    {} ({}, {} bytes)",
                                        attachment.file_name,
                                        attachment.mime_type,
                                        attachment.len()
                                    );
                                }
                            }
                        }
                        ChatCommand::Detach => {
                            pending.clear();
                            print_info(use_color, "Attachments dropped.");
                        }
                        ChatCommand::Stats => print_stats(&session),
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {line}");
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            print_error(use_color, &message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the API.
                let attachments = std::mem::take(&mut pending);
                match session.send_with_attachments(line, attachments).await {
                    Ok(reply) => {
                        println!("Assistant: {reply}\n");
                    }
                    Err(err) => {
                        print_error(use_color, &err.to_string());
                    }
                }
                if interrupted.swap(false, Ordering::Relaxed) {
                    print_info(
                        use_color,
                        "Requests cannot be cancelled once issued; the result above already \
                         landed in history.",
                    );
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - drop the line and keep going.
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                print_error(use_color, &format!("Input error: {err}"));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Model: {}", stats.model);
    println!("      Temperature: {:.2}", stats.temperature);
    println!("      Messages: {}", stats.message_count);
    println!("      Requests: {}", stats.request_count);
    println!("      History file: {}", session.history_path().display());
    for message in session.messages() {
        let role = if message.is_user { "you" } else { "assistant" };
        println!("        {} [{}] {}", message.id, role, preview(&message.content));
    }
}

fn preview(content: &str) -> String {
    let mut preview: String = content.chars().take(40).collect();
    if preview.len() < content.len() {
        preview.push_str("...");
    }
    preview
}

fn print_info(use_color: bool, info: &str) {
    if use_color {
        println!("{ANSI_DIM}{info}{ANSI_RESET}");
    } else {
        println!("{info}");
    }
}

fn print_error(use_color: bool, error: &str) {
    if use_color {
        eprintln!("{ANSI_RED}{error}{ANSI_RESET}");
    } else {
        eprintln!("{error}");
    }
}
