//! Logging trait for chat client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to
//! capture and record traffic passing through the [`Client`]. Logging is
//! diagnostic only and never behavior-relevant.
//!
//! [`Client`]: crate::client::Client

use crate::error::Error;
use crate::types::ChatRequest;

/// A trait for observing chat client operations.
///
/// Implement this trait to capture each outgoing request, each reply, and
/// each failure.
///
/// # Example
///
/// ```rust,ignore
/// use palaver::{ChatRequest, ClientLogger, Error};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_request(&self, request: &ChatRequest) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "-> {}", serde_json::to_string(request).unwrap()).unwrap();
///     }
///
///     fn log_reply(&self, reply: &str) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "<- {}", reply).unwrap();
///     }
///
///     fn log_error(&self, error: &Error) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "!! {}", error).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log an outgoing request, after validation and before the network
    /// call.
    fn log_request(&self, request: &ChatRequest);

    /// Log the reply text of a successful call.
    fn log_reply(&self, reply: &str);

    /// Log a failed call.
    fn log_error(&self, error: &Error);
}
