//! Configuration for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and resolution of
//! arguments plus environment into the settings the REPL needs.

use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::config::ClientConfig;
use crate::error::Result;

/// Default history file, relative to the working directory.
const DEFAULT_HISTORY_FILE: &str = "palaver-history.json";

/// Default last-message slot file, placed next to the history file.
const DEFAULT_SLOT_FILE: &str = "palaver-last-message.json";

/// Command-line arguments for the palaver-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: deepseek-chat)", "MODEL")]
    pub model: Option<String>,

    /// Base URL of the completion endpoint.
    #[arrrg(optional, "Endpoint base URL", "URL")]
    pub base_url: Option<String>,

    /// Path of the conversation history file.
    #[arrrg(optional, "History file (default: palaver-history.json)", "PATH")]
    pub history: Option<String>,

    /// Path of the last-message slot file.
    #[arrrg(optional, "Last-message slot file", "PATH")]
    pub last_message: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Resolved settings for a chat run.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// The client configuration (credential from the environment, overrides
    /// from the command line).
    pub client: ClientConfig,

    /// Where the conversation history lives.
    pub history_path: PathBuf,

    /// Where the last-message slot lives.
    pub slot_path: PathBuf,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatArgs {
    /// Resolve arguments against the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when no credential is available via
    /// `PALAVER_API_KEY`.
    pub fn resolve(self) -> Result<ChatSettings> {
        let mut client = ClientConfig::from_env()?;
        if let Some(model) = self.model {
            client.model = model;
        }
        if let Some(base_url) = self.base_url {
            client.base_url = base_url;
        }

        let history_path = PathBuf::from(
            self.history
                .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string()),
        );
        let slot_path = match self.last_message {
            Some(path) => PathBuf::from(path),
            None => history_path.with_file_name(DEFAULT_SLOT_FILE),
        };

        Ok(ChatSettings {
            client,
            history_path,
            slot_path,
            use_color: !self.no_color,
        })
    }
}
