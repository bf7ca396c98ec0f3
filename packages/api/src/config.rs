//! # Client configuration — `medical-client.toml` and environment
//!
//! The only behavioural knob is the base address of the REST API. It defaults
//! to the development backend and can be overridden by the `API_BASE_URL`
//! environment variable (also read from a `.env` file through `dotenvy`).
//!
//! ```toml
//! api_base_url = "https://clinic.example.com/api"
//! timeout_secs = 15      # optional, no timeout when absent
//! ```
//!
//! A missing or empty file is equivalent to [`ClientConfig::default`].

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Default address of the REST API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Whole-request timeout in seconds. Not applied on wasm, where the
    /// browser owns request lifetimes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            timeout_secs: None,
        }
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Default configuration with the environment override applied.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::default().with_base_url_override(std::env::var(API_BASE_URL_ENV).ok())
    }

    /// Replace the base address when `value` is present and not blank.
    pub fn with_base_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            tracing::debug!(api_base_url = %url, "Using API base URL override");
            self.api_base_url = url;
        }
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "medical-client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
