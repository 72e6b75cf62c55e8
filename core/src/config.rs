//! Client configuration.
//!
//! The only knob is the base URL. It defaults to the public service and can
//! be pointed elsewhere (a local mock, a staging host) through
//! `BURGERS_BASE_URL`.

use std::env;

use crate::endpoints::DEFAULT_BASE_URL;
use crate::error::{ApiError, ApiResult};

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "BURGERS_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read `BURGERS_BASE_URL`, falling back to the public service.
    pub fn from_env() -> ApiResult<Self> {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let config = Self { base_url };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }
        Ok(())
    }
}
