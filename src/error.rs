//! Error types for the palaver crate.
//!
//! This module defines the error taxonomy for the chat-completion client
//! and the conversation store. Every failure a caller can observe is one
//! of the kinds below; the client never retries or recovers internally.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for palaver operations.
#[derive(Clone, Debug)]
pub enum Error {
    /// The endpoint URL could not be constructed, or no credential is
    /// available.
    InvalidConfiguration {
        /// Human-readable error message.
        message: String,
        /// The underlying URL parse error, when one exists.
        source: Option<url::ParseError>,
    },

    /// The outgoing message is empty, or the request payload could not be
    /// serialized.
    InvalidRequest {
        /// Human-readable error message.
        message: String,
    },

    /// The HTTP exchange succeeded but the body does not have the expected
    /// shape.
    InvalidResponse {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Non-2xx status with a decodable structured error body.
    Api {
        /// HTTP status code.
        status_code: u16,
        /// The provider's error message, verbatim.
        message: String,
    },

    /// Non-2xx status without a decodable error body.
    Server {
        /// HTTP status code.
        status_code: u16,
    },

    /// Transport-level failure: no usable response at all.
    Network {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Local I/O failure while persisting history or reading attachments.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },
}

impl Error {
    /// Creates a new invalid configuration error.
    pub fn invalid_configuration(
        message: impl Into<String>,
        source: Option<url::ParseError>,
    ) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
            source,
        }
    }

    /// Creates a new invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new invalid response error.
    pub fn invalid_response(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::InvalidResponse {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new API error from a decoded error body.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new server error for an undecodable error body.
    pub fn server(status_code: u16) -> Self {
        Error::Server { status_code }
    }

    /// Creates a new network error.
    pub fn network(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Network {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Returns true if this error is an invalid request.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Error::InvalidRequest { .. })
    }

    /// Returns true if this error is an invalid response.
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Error::InvalidResponse { .. })
    }

    /// Returns true if this error came back from the API as a structured
    /// error body.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Returns true if this error is a transport-level failure.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. })
    }

    /// Returns the HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            Error::Server { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration { message, .. } => {
                write!(f, "Invalid configuration: {message}")
            }
            Error::InvalidRequest { message } => {
                write!(f, "Invalid request: {message}")
            }
            Error::InvalidResponse { message, .. } => {
                write!(f, "Invalid response: {message}")
            }
            Error::Api { message, .. } => {
                write!(f, "API error: {message}")
            }
            Error::Server { status_code } => {
                write!(f, "Server error: {status_code}")
            }
            Error::Network { message, .. } => {
                write!(f, "Network error: {message}")
            }
            Error::Io { message, .. } => {
                write!(f, "I/O error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidConfiguration { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            Error::InvalidResponse { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Network { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

/// A specialized Result type for palaver operations.
pub type Result<T> = std::result::Result<T, Error>;
