//! # Client Configuration
//!
//! Connection parameters for a session: where the external application
//! listens, the optional user token it expects, and timeouts.
//!
//! Configuration can come from code, from the environment, or from a JSON
//! file:
//!
//! | Variable               | Field          |
//! |------------------------|----------------|
//! | `FEMREST_URL`          | `base_url`     |
//! | `FEMREST_USER`         | `user`         |
//! | `FEMREST_TIMEOUT_SECS` | `timeout_secs` |
//!
//! ## Example
//!
//! ```rust
//! use femrest_core::config::ClientConfig;
//!
//! let config = ClientConfig::new("http://192.168.1.20:5151").with_user("analyst");
//! let url = config.endpoint_url("/node/add").unwrap();
//! assert_eq!(url.as_str(), "http://192.168.1.20:5151/node/add");
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{ClientError, ClientResult};

/// Address the external application serves its REST interface on
pub const DEFAULT_BASE_URL: &str = "http://localhost:5151";

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_URL: &str = "FEMREST_URL";
pub const ENV_USER: &str = "FEMREST_USER";
pub const ENV_TIMEOUT_SECS: &str = "FEMREST_TIMEOUT_SECS";

/// Connection parameters for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the external application's REST interface
    pub base_url: String,

    /// Token sent in the `user` header on every request
    pub user: Option<String>,

    /// Overall per-request timeout. `None` lets a solve block for as long
    /// as the application needs.
    pub timeout_secs: Option<u64>,

    /// Time allowed to establish the TCP connection
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user: None,
            timeout_secs: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Configuration for an application listening at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Defaults overlaid with `FEMREST_*` environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        ClientConfig::default().overlay(lookup)
    }

    /// This configuration overlaid with `FEMREST_*` environment variables.
    pub fn overlay_env(self) -> ClientResult<Self> {
        self.overlay(|key| std::env::var(key).ok())
    }

    /// Replace fields for which `lookup` has a value. Blank values are
    /// ignored.
    pub fn overlay<F>(mut self, lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = value(ENV_URL) {
            self.base_url = url;
        }
        if let Some(user) = value(ENV_USER) {
            self.user = Some(user);
        }
        if let Some(secs) = value(ENV_TIMEOUT_SECS) {
            let secs = secs
                .parse()
                .map_err(|_| ClientError::config(ENV_TIMEOUT_SECS, format!("'{}' is not a whole number of seconds", secs)))?;
            self.timeout_secs = Some(secs);
        }
        self.validate()?;
        Ok(self)
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn load(path: &Path) -> ClientResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ClientError::config(path.display().to_string(), format!("cannot read file: {}", e)))?;
        let config: ClientConfig = serde_json::from_str(&json)
            .map_err(|e| ClientError::config(path.display().to_string(), format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to a JSON file.
    pub fn save(&self, path: &Path) -> ClientResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ClientError::config(path.display().to_string(), e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| ClientError::config(path.display().to_string(), format!("cannot write file: {}", e)))
    }

    /// Check that the base URL is usable and the user token can be sent as
    /// a header value.
    pub fn validate(&self) -> ClientResult<()> {
        self.base()?;
        if let Some(user) = &self.user {
            HeaderValue::from_str(user)
                .map_err(|_| ClientError::config("user", "token contains characters not allowed in a header"))?;
        }
        Ok(())
    }

    /// Parsed base URL with a trailing slash, so joins append instead of
    /// replacing the last path segment.
    pub fn base(&self) -> ClientResult<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).map_err(|e| ClientError::config("base_url", format!("'{}': {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::config(
                "base_url",
                format!("unsupported scheme '{}', expected http or https", other),
            )),
        }
    }

    /// Full URL for an operation path such as `/node/add`.
    pub fn endpoint_url(&self, path: &str) -> ClientResult<Url> {
        let base = self.base()?;
        base.join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::config("base_url", format!("cannot join '{}': {}", path, e)))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
