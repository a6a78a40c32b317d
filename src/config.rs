//! Client configuration.
//!
//! The configuration surface the core requires is small: a bearer
//! credential and a base URL, plus the model id and sampling temperature
//! that ride along in each request. Everything has a default except the
//! credential.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default completion endpoint base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Default model id.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for a [`Client`].
///
/// Provider differences (endpoint, model, credential) are all here; there
/// is one client type, not one per provider.
///
/// [`Client`]: crate::client::Client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// The bearer credential sent in the `Authorization` header.
    pub api_key: String,

    /// Base URL of the completion endpoint; the request path
    /// `/chat/completions` is appended to this.
    pub base_url: String,

    /// The model id requested for every completion.
    pub model: String,

    /// Sampling temperature sent with every request.
    pub temperature: f64,

    /// Timeout applied to the whole HTTP exchange.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the given credential and all other
    /// fields at their defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a configuration from the environment.
    ///
    /// `PALAVER_API_KEY` is required; `PALAVER_BASE_URL` and
    /// `PALAVER_MODEL` override the defaults when set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("PALAVER_API_KEY").map_err(|_| {
            Error::invalid_configuration(
                "API key not provided and PALAVER_API_KEY environment variable not set",
                None,
            )
        })?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var("PALAVER_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = env::var("PALAVER_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model id.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
