use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response};
use url::Url;

use crate::client_logger::ClientLogger;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{ChatRequest, ChatResponse, ErrorResponse, FileAttachment};

/// Client for an OpenAI-compatible chat completion endpoint.
///
/// The client is stateless and reentrant-safe: it holds no conversation
/// state, and concurrent calls are legal (their completions interleave in
/// resolution order). Callers wanting at-most-one outstanding request per
/// conversation serialize calls themselves; [`ChatSession`] does exactly
/// that.
///
/// A call either completes with one full reply or fails once. There are
/// no retries, no streaming, and no cancellation beyond dropping the
/// future (the request itself cannot be aborted).
///
/// [`ChatSession`]: crate::chat::ChatSession
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    client: ReqwestClient,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl Client {
    /// Create a new client.
    ///
    /// The endpoint URL and credential are validated here so that
    /// misconfiguration surfaces at construction rather than on the first
    /// call.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                Error::invalid_configuration(format!("failed to build HTTP client: {err}"), None)
            })?;

        let this = Self {
            config,
            client,
            logger: None,
        };
        this.endpoint()?;
        this.default_headers()?;
        Ok(this)
    }

    /// Create a new client configured from the environment.
    ///
    /// See [`ClientConfig::from_env`] for the variables consulted.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Attach a logger observing requests, replies, and errors.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the active configuration for mutation.
    ///
    /// Changes take effect on the next call; the request timeout is fixed
    /// once at construction.
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// Send one user turn and return the assistant's reply text.
    ///
    /// `text` must be non-empty after trimming. Attachments, when present,
    /// are embedded base64-encoded in the request's `files` array.
    ///
    /// # Errors
    ///
    /// Fails with one of the kinds in [`Error`]; see the crate error
    /// taxonomy. Never retries.
    pub async fn send_message(
        &self,
        text: &str,
        attachments: &[FileAttachment],
    ) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            observability::CLIENT_EMPTY_MESSAGES.click();
            let err = Error::invalid_request("message text is empty");
            if let Some(logger) = &self.logger {
                logger.log_error(&err);
            }
            return Err(err);
        }

        let url = self.endpoint()?;
        let headers = self.default_headers()?;
        let request = ChatRequest::new(&self.config.model, text, self.config.temperature)
            .with_attachments(attachments);
        let body = serde_json::to_vec(&request).map_err(|err| {
            Error::invalid_request(format!("failed to serialize request payload: {err}"))
        })?;
        if let Some(logger) = &self.logger {
            logger.log_request(&request);
        }

        observability::CLIENT_REQUESTS.click();
        let start = Instant::now();
        let outcome = self.dispatch(url, headers, body).await;
        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        match &outcome {
            Ok(reply) => {
                if let Some(logger) = &self.logger {
                    logger.log_reply(reply);
                }
            }
            Err(err) => {
                observability::CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_error(err);
                }
            }
        }
        outcome
    }

    async fn dispatch(&self, url: Url, headers: HeaderMap, body: Vec<u8>) -> Result<String> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    Error::network(format!("request timed out: {err}"), Some(Box::new(err)))
                } else if err.is_connect() {
                    Error::network(format!("connection error: {err}"), Some(Box::new(err)))
                } else {
                    Error::network(format!("request failed: {err}"), Some(Box::new(err)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let body = response.text().await.map_err(|err| {
            Error::network(
                format!("failed to read response body: {err}"),
                Some(Box::new(err)),
            )
        })?;
        reply_from_body(&body)
    }

    /// Construct the `/chat/completions` URL from the configured base.
    fn endpoint(&self) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let address = format!("{base}/chat/completions");
        Url::parse(&address).map_err(|err| {
            Error::invalid_configuration(format!("invalid endpoint URL: {address}"), Some(err))
        })
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|_| {
                Error::invalid_configuration(
                    "API key contains characters that cannot appear in an Authorization header",
                    None,
                )
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Convert a non-2xx response into the matching error kind.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) => error_from_body(status_code, &body),
            Err(err) => Error::network(
                format!("failed to read error response: {err}"),
                Some(Box::new(err)),
            ),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

/// Map a non-2xx status and body to an error kind.
///
/// A body decodable as `{"error":{"message"}}` surfaces the provider's
/// message verbatim; anything else is reported by status code alone.
pub(crate) fn error_from_body(status_code: u16, body: &str) -> Error {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(decoded) => Error::api(status_code, decoded.message()),
        Err(_) => Error::server(status_code),
    }
}

/// Extract the reply text from a 2xx response body.
pub(crate) fn reply_from_body(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|err| {
        Error::invalid_response(
            "response body is not JSON in the expected shape",
            Some(Box::new(err)),
        )
    })?;
    match response.reply() {
        Some(reply) => Ok(reply.to_string()),
        None => Err(Error::invalid_response("response contained no choices", None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        Client::new(ClientConfig::new("test-key")).unwrap()
    }

    #[test]
    fn client_creation() {
        let client = test_client();
        assert_eq!(client.config().base_url, crate::config::DEFAULT_BASE_URL);
        assert_eq!(client.config().model, crate::config::DEFAULT_MODEL);

        let client = Client::new(
            ClientConfig::new("test-key").with_base_url("https://custom.example.com/api"),
        )
        .unwrap();
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://custom.example.com/api/chat/completions"
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let client =
            Client::new(ClientConfig::new("k").with_base_url("https://example.com/v1/")).unwrap();
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://example.com/v1/chat/completions"
        );
    }

    #[test]
    fn malformed_base_url_is_invalid_configuration() {
        let err = Client::new(ClientConfig::new("k").with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn unstorable_api_key_is_invalid_configuration() {
        let err = Client::new(ClientConfig::new("key\nwith\nnewlines")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[tokio::test]
    async fn empty_message_fails_before_any_network() {
        let client = test_client();
        let err = client.send_message("", &[]).await.unwrap_err();
        assert!(err.is_invalid_request());

        let err = client.send_message("   \t\n", &[]).await.unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn decodable_error_body_is_api_error() {
        let err = error_from_body(401, r#"{"error":{"message":"Invalid API key"}}"#);
        match err {
            Error::Api {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 401);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn undecodable_error_body_is_server_error() {
        let err = error_from_body(500, "<html>Internal Server Error</html>");
        assert!(matches!(err, Error::Server { status_code: 500 }));

        let err = error_from_body(503, "{}");
        assert!(matches!(err, Error::Server { status_code: 503 }));
    }

    #[test]
    fn reply_is_returned_unaltered() {
        let body = r#"{"choices":[{"message":{"content":"¡Hola! 👋 здравствуйте"}}]}"#;
        assert_eq!(reply_from_body(body).unwrap(), "¡Hola! 👋 здравствуйте");
    }

    #[test]
    fn long_replies_are_returned_whole() {
        let long = "lorem ipsum 🌱 ".repeat(400);
        let body = serde_json::to_string(&serde_json::json!({
            "choices": [{"message": {"content": long.clone()}}]
        }))
        .unwrap();
        assert_eq!(reply_from_body(&body).unwrap(), long);
    }

    #[test]
    fn non_json_success_body_is_invalid_response() {
        let err = reply_from_body("Invalid JSON").unwrap_err();
        assert!(err.is_invalid_response());
    }

    #[test]
    fn missing_choices_is_invalid_response() {
        let err = reply_from_body(r#"{"choices":[]}"#).unwrap_err();
        assert!(err.is_invalid_response());
    }
}
