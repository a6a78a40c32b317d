// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod config;
pub mod error;
pub mod observability;
pub mod store;
pub mod types;
pub mod utils;

// Re-exports
pub use client::Client;
pub use client_logger::ClientLogger;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use store::{ConversationStore, LastMessageSlot};
pub use types::*;
