use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named binary payload carried by exactly one [`Message`].
///
/// The bytes are held raw in memory and serialized as standard base64.
///
/// [`Message`]: crate::types::Message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileAttachment {
    /// The name the payload was attached under, usually the file name.
    pub file_name: String,

    /// MIME type describing the payload.
    pub mime_type: String,

    /// The raw payload bytes.
    #[serde(with = "crate::utils::base64")]
    pub file_data: Vec<u8>,
}

impl FileAttachment {
    /// Create a new `FileAttachment` from in-memory bytes.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        file_data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            file_data,
        }
    }

    /// Create a `FileAttachment` by reading a file from disk.
    ///
    /// The MIME type is guessed from the file extension, falling back to
    /// `application/octet-stream` for anything unrecognized.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = guess_mime_type(path);
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("attachment")
            .to_string();

        let mut file = File::open(path)
            .map_err(|err| Error::io(format!("failed to open {}", path.display()), err))?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;

        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            file_data: buffer,
        })
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.file_data.len()
    }

    /// True when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.file_data.is_empty()
    }
}

fn guess_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
