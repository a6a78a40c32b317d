use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::types::FileAttachment;
use crate::utils;

/// One turn of a conversation, authored by either the human or the model.
///
/// A `Message` is immutable once created: an edit is modeled as a removal
/// followed by a fresh append, never an in-place mutation. Attachments are
/// owned inline, so removing the record removes them with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique identifier, generated at creation.
    pub id: Uuid,

    /// The text body of the turn.
    pub content: String,

    /// Role discriminator: `true` for the human author, `false` for the
    /// model author.
    pub is_user: bool,

    /// Creation time. Non-decreasing within a conversation in the common
    /// case; not enforced.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,

    /// Files carried with this turn, in the order they were attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<FileAttachment>,
}

impl Message {
    /// Create a new `Message` with a generated id and the current time.
    pub fn new(content: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            is_user,
            timestamp: utils::time::now(),
            attachments: Vec::new(),
        }
    }

    /// Create a new human-authored `Message`.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    /// Create a new model-authored `Message`.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }

    /// Attach files to this message.
    pub fn with_attachments(mut self, attachments: Vec<FileAttachment>) -> Self {
        self.attachments = attachments;
        self
    }
}
