//! Conversation persistence.
//!
//! The store holds the ordered message sequence for the lifetime of the
//! session and rewrites it to disk, whole, on every mutation. Persistence
//! cost is therefore O(total conversation size) per mutation. That is
//! acceptable at personal-chat-log scale, and a documented limitation
//! rather than a bug.
//!
//! Mutation serializes through `&mut self`. Two stores opened on the same
//! file are a lost-update hazard; there is no partial or merge write path,
//! so concurrent mutation of one file must be externally synchronized.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::observability;
use crate::types::Message;

const HISTORY_VERSION: u8 = 1;

/// Ordered, file-backed storage for one conversation.
///
/// Opening reads the whole history; missing or undecodable data silently
/// becomes an empty conversation, never an error. Every mutation rewrites
/// the whole file; a failed rewrite leaves the in-memory sequence as it
/// was before the call.
pub struct ConversationStore {
    path: PathBuf,
    messages: Vec<Message>,
    slot: Option<LastMessageSlot>,
}

impl ConversationStore {
    /// Open the store at `path`, loading any persisted history.
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let messages = load_messages(&path);
        Self {
            path,
            messages,
            slot: None,
        }
    }

    /// Attach a last-message slot, updated on every append.
    pub fn with_last_message_slot(mut self, slot: LastMessageSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// The path backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The number of messages held.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when the conversation is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message and rewrite the history file.
    ///
    /// When a last-message slot is attached it is updated as well; a slot
    /// write failure never fails the append.
    pub fn append(&mut self, message: Message) -> Result<()> {
        self.messages.push(message);
        if let Err(err) = self.persist() {
            self.messages.pop();
            return Err(err);
        }
        if let Some(slot) = &self.slot {
            let newest = &self.messages[self.messages.len() - 1];
            if slot.record(newest).is_err() {
                observability::SLOT_WRITE_ERRORS.click();
            }
        }
        Ok(())
    }

    /// Remove the message with the given id, if present.
    ///
    /// Returns `Ok(true)` when a message was removed. An absent id is a
    /// no-op: nothing is rewritten and `Ok(false)` is returned.
    pub fn remove(&mut self, id: Uuid) -> Result<bool> {
        let Some(index) = self.messages.iter().position(|m| m.id == id) else {
            return Ok(false);
        };
        let removed = self.messages.remove(index);
        if let Err(err) = self.persist() {
            self.messages.insert(index, removed);
            return Err(err);
        }
        Ok(true)
    }

    /// Empty the conversation and persist the empty state.
    pub fn clear(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.messages);
        if let Err(err) = self.persist() {
            self.messages = previous;
            return Err(err);
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        observability::STORE_WRITES.click();
        let history = HistoryFile::new(&self.messages);
        let file = File::create(&self.path).map_err(|err| {
            observability::STORE_WRITE_ERRORS.click();
            Error::io(
                format!("failed to create history file {}", self.path.display()),
                err,
            )
        })?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &history).map_err(|err| {
            observability::STORE_WRITE_ERRORS.click();
            Error::io(
                format!("failed to write history file {}", self.path.display()),
                std::io::Error::other(err),
            )
        })
    }
}

fn load_messages(path: &Path) -> Vec<Message> {
    let Ok(file) = File::open(path) else {
        return Vec::new();
    };
    let reader = BufReader::new(file);
    match from_reader::<_, HistoryFile>(reader) {
        Ok(history) => history.messages,
        Err(_) => {
            observability::STORE_CORRUPT_LOADS.click();
            Vec::new()
        }
    }
}

#[derive(Serialize, Deserialize)]
struct HistoryFile {
    version: u8,
    messages: Vec<Message>,
}

impl HistoryFile {
    fn new(messages: &[Message]) -> Self {
        Self {
            version: HISTORY_VERSION,
            messages: messages.to_vec(),
        }
    }
}

/// A single-slot copy of the most recent message.
///
/// This duplicates, rather than replaces, the conversation store: it is
/// rewritten on every append so that another process (a status widget, a
/// notifier) can read the latest turn without loading the whole history.
/// Read-side corruption or absence yields `None`.
#[derive(Debug, Clone)]
pub struct LastMessageSlot {
    path: PathBuf,
}

impl LastMessageSlot {
    /// Create a slot backed by `path`.
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The path backing this slot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the slot with `message`.
    pub fn record(&self, message: &Message) -> Result<()> {
        observability::SLOT_WRITES.click();
        let file = File::create(&self.path).map_err(|err| {
            Error::io(
                format!("failed to create slot file {}", self.path.display()),
                err,
            )
        })?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, message).map_err(|err| {
            Error::io(
                format!("failed to write slot file {}", self.path.display()),
                std::io::Error::other(err),
            )
        })
    }

    /// Read the most recent message, if one is stored and decodable.
    pub fn load(&self) -> Option<Message> {
        let file = File::open(&self.path).ok()?;
        from_reader(BufReader::new(file)).ok()
    }
}
