//! Client configuration.
//!
//! [`ClientConfig`] is the effective configuration: built once when a client
//! is created and read-only afterwards. [`ClientOptions`] is the user-facing
//! overrides document, deep-merged over the defaults by
//! [`ClientConfig::from_options`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default base URL for the WSF REST API.
pub const DEFAULT_BASE_URL: &str = "http://www.wsdot.wa.gov/ferries/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Service name → path prefix below the base URL.
const DEFAULT_SERVICES: [(&str, &str); 4] = [
    ("fares", "/fares/rest"),
    ("schedule", "/schedule/rest"),
    ("terminals", "/terminals/rest"),
    ("vessels", "/vessels/rest"),
];

/// Effective configuration for a [`WsfClient`](crate::wsf::WsfClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API access code appended to every endpoint as `apiaccesscode`
    pub api_access_code: String,
    /// Generic base URL, used for unknown service names
    pub base_url: String,
    /// Service name → path prefix appended to `base_url`
    pub services: BTreeMap<String, String>,
    /// Rewrite `/Date(ms-offset)/` tokens to integers before parsing
    pub fix_dates: bool,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create a new config with the given access code and default settings.
    pub fn new(api_access_code: impl Into<String>) -> Self {
        let services = DEFAULT_SERVICES
            .iter()
            .map(|(name, prefix)| (name.to_string(), prefix.to_string()))
            .collect();

        let headers = BTreeMap::from([
            ("Accept".to_string(), "*/*".to_string()),
            ("Connection".to_string(), "close".to_string()),
            (
                "User-Agent".to_string(),
                concat!("wsf-client/", env!("CARGO_PKG_VERSION")).to_string(),
            ),
        ]);

        Self {
            api_access_code: api_access_code.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            services,
            fix_dates: true,
            headers,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Build the effective configuration by merging `options` over the defaults.
    pub fn from_options(options: ClientOptions) -> Self {
        let mut config = Self::new(options.api_access_code.unwrap_or_default());

        if let Some(fix_dates) = options.fix_dates {
            config.fix_dates = fix_dates;
        }

        if let Some(rest) = options.rest {
            if let Some(base) = rest.base {
                config.base_url = base;
            }
            config.services.extend(rest.services);
        }

        if let Some(request) = options.request_options {
            config.headers.extend(request.headers);
            if let Some(secs) = request.timeout_secs {
                config.timeout_secs = secs;
            }
        }

        config
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Add or replace a service prefix.
    pub fn with_service(mut self, name: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.services.insert(name.into(), prefix.into());
        self
    }

    /// Enable or disable date repair.
    pub fn with_fix_dates(mut self, fix_dates: bool) -> Self {
        self.fix_dates = fix_dates;
        self
    }

    /// Add or replace a default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Base prefix for a service, falling back to the generic base URL.
    pub fn service_base(&self, service: Option<&str>) -> String {
        match service.and_then(|name| self.services.get(name)) {
            Some(prefix) => format!("{}{}", self.base_url, prefix),
            None => self.base_url.clone(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// User-supplied configuration overrides.
///
/// Every field is optional; maps are merged key by key over the defaults.
///
/// ```
/// use wsf_client::config::{ClientConfig, ClientOptions};
///
/// let options = ClientOptions::from_json_str(
///     r#"{"api_access_code": "XXXX", "request_options": {"headers": {"Accept": "application/json"}}}"#,
/// )
/// .unwrap();
/// let config = ClientConfig::from_options(options);
///
/// assert_eq!(config.api_access_code, "XXXX");
/// assert_eq!(config.headers["Accept"], "application/json");
/// assert_eq!(config.headers["Connection"], "close");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientOptions {
    pub api_access_code: Option<String>,
    pub fix_dates: Option<bool>,
    pub rest: Option<RestOptions>,
    pub request_options: Option<RequestOptions>,
}

/// Overrides for URL routing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestOptions {
    pub base: Option<String>,
    #[serde(default)]
    pub services: BTreeMap<String, String>,
}

/// Overrides for the HTTP transport.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestOptions {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub timeout_secs: Option<u64>,
}

impl ClientOptions {
    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
