//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which ties the completion
//! client to the conversation store: one send call is one user turn, one
//! network exchange, and up to two appends.

use std::path::Path;

use uuid::Uuid;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::store::ConversationStore;
use crate::types::{FileAttachment, Message};

/// A chat session that manages conversation state and API interaction.
///
/// `send` takes `&mut self`, so a session has at most one outstanding
/// request; the conversation cannot interleave with itself. The session
/// appends the user message before the network call and the assistant
/// message after it, persisting on each append. When the call fails the
/// user message stays in history and the error propagates to the caller.
pub struct ChatSession {
    client: Client,
    store: ConversationStore,
    request_count: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: String,
    /// The sampling temperature sent with each request.
    pub temperature: f64,
    /// The number of messages in the conversation.
    pub message_count: usize,
    /// Total number of API requests attempted.
    pub request_count: u64,
}

impl ChatSession {
    /// Creates a new chat session over the given client and store.
    pub fn new(client: Client, store: ConversationStore) -> Self {
        Self {
            client,
            store,
            request_count: 0,
        }
    }

    /// Sends a user turn and returns the assistant's reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty after trimming, the request
    /// fails, or persistence fails.
    pub async fn send(&mut self, text: &str) -> Result<String> {
        self.send_with_attachments(text, Vec::new()).await
    }

    /// Sends a user turn carrying attachments.
    pub async fn send_with_attachments(
        &mut self,
        text: &str,
        attachments: Vec<FileAttachment>,
    ) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::invalid_request("message text is empty"));
        }

        let user_message = Message::user(text).with_attachments(attachments);
        let attachments = user_message.attachments.clone();
        self.store.append(user_message)?;

        self.request_count += 1;
        let reply = self.client.send_message(text, &attachments).await?;
        self.store.append(Message::assistant(reply.clone()))?;
        Ok(reply)
    }

    /// The conversation, oldest message first.
    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    /// Returns the number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.store.len()
    }

    /// Removes one message by id. Absent ids are a no-op.
    pub fn remove(&mut self, id: Uuid) -> Result<bool> {
        self.store.remove(id)
    }

    /// Clears the conversation history, persisting the empty state.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }

    /// Changes the model used for subsequent requests.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.client.config_mut().model = model.into();
    }

    /// Returns the current model id.
    pub fn model(&self) -> &str {
        &self.client.config().model
    }

    /// Sets the sampling temperature for subsequent requests.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.client.config_mut().temperature = temperature;
    }

    /// Returns the current sampling temperature.
    pub fn temperature(&self) -> f64 {
        self.client.config().temperature
    }

    /// The path of the backing history file.
    pub fn history_path(&self) -> &Path {
        self.store.path()
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.client.config().model.clone(),
            temperature: self.client.config().temperature,
            message_count: self.store.len(),
            request_count: self.request_count,
        }
    }
}
