use serde::{Deserialize, Serialize};

/// The structured error body a completion endpoint returns alongside a
/// non-2xx status.
///
/// Bodies that fail to decode into this shape are reported by status code
/// alone instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The error object containing the provider's message.
    pub error: ErrorDetail,
}

/// The inner error object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Human-readable error message, surfaced verbatim to the caller.
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
            },
        }
    }

    /// Returns the provider's error message.
    pub fn message(&self) -> &str {
        &self.error.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_error() {
        let json = r#"{"error":{"message":"Invalid API key"}}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message(), "Invalid API key");
    }

    #[test]
    fn serializes_to_expected_shape() {
        let response = ErrorResponse::new("Invalid API key");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"error":{"message":"Invalid API key"}}"#);
    }

    #[test]
    fn missing_message_fails_to_decode() {
        let result: Result<ErrorResponse, _> = serde_json::from_str(r#"{"error":{}}"#);
        assert!(result.is_err());
    }
}
