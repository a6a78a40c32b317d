use serde::{Deserialize, Serialize};

use crate::types::FileAttachment;
use crate::utils;

/// The JSON body of a `POST /chat/completions` request.
///
/// Each call carries exactly one user turn; the endpoint is not given any
/// prior conversation context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// The model id to complete with.
    pub model: String,

    /// The messages to complete. Always a single `user` entry here.
    pub messages: Vec<RequestMessage>,

    /// Sampling temperature.
    pub temperature: f64,

    /// Attached files, base64-encoded. Omitted when there are none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FilePayload>>,
}

/// A single entry of the request `messages` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestMessage {
    /// The author role, e.g. `"user"`.
    pub role: String,

    /// The text content of the turn.
    pub content: String,
}

/// One entry of the request `files` array.
///
/// Kept in one place so a provider-accurate encoding stays a local change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilePayload {
    /// The attachment name.
    pub name: String,

    /// The attachment MIME type.
    #[serde(rename = "type")]
    pub kind: String,

    /// The attachment bytes, base64-encoded.
    pub content: String,
}

impl ChatRequest {
    /// Create a request for a single user turn.
    pub fn new(model: impl Into<String>, text: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            messages: vec![RequestMessage {
                role: "user".to_string(),
                content: text.into(),
            }],
            temperature,
            files: None,
        }
    }

    /// Embed attachments into the request.
    ///
    /// An empty slice leaves the `files` field absent entirely.
    pub fn with_attachments(mut self, attachments: &[FileAttachment]) -> Self {
        if attachments.is_empty() {
            self.files = None;
        } else {
            self.files = Some(attachments.iter().map(FilePayload::from).collect());
        }
        self
    }
}

impl From<&FileAttachment> for FilePayload {
    fn from(attachment: &FileAttachment) -> Self {
        Self {
            name: attachment.file_name.clone(),
            kind: attachment.mime_type.clone(),
            content: utils::base64::encode(&attachment.file_data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn request_without_files() {
        let request = ChatRequest::new("deepseek-chat", "Hello, how are you?", 0.7);
        let value = to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "deepseek-chat",
                "messages": [
                    {"role": "user", "content": "Hello, how are you?"}
                ],
                "temperature": 0.7
            })
        );
    }

    #[test]
    fn request_with_files() {
        let attachment = FileAttachment::new("hello.txt", "text/plain", b"Hello World".to_vec());
        let request =
            ChatRequest::new("deepseek-chat", "see attached", 0.7).with_attachments(&[attachment]);
        let value = to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "deepseek-chat",
                "messages": [
                    {"role": "user", "content": "see attached"}
                ],
                "temperature": 0.7,
                "files": [
                    {"name": "hello.txt", "type": "text/plain", "content": "SGVsbG8gV29ybGQ="}
                ]
            })
        );
    }

    #[test]
    fn empty_attachment_slice_omits_files() {
        let request = ChatRequest::new("deepseek-chat", "hi", 0.7).with_attachments(&[]);
        let value = to_value(&request).unwrap();
        assert!(value.get("files").is_none());
    }
}
