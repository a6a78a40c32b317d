//! Data model and wire types.
//!
//! One type (or one tightly-coupled family) per file: the persisted
//! conversation records, and the request/response shapes exchanged with
//! the completion endpoint.

mod chat_request;
mod chat_response;
mod error_response;
mod file_attachment;
mod message;

pub use chat_request::{ChatRequest, FilePayload, RequestMessage};
pub use chat_response::{ChatResponse, Choice, ChoiceMessage};
pub use error_response::{ErrorDetail, ErrorResponse};
pub use file_attachment::FileAttachment;
pub use message::Message;
