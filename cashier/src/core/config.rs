use cashier_client::ClientConfig;
use chrono_tz::Tz;

use crate::utils::time::{DEFAULT_TIMEZONE, parse_timezone};

/// Cashier configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | BACKEND_URL | http://localhost:3000 | Catalog/transaction backend |
/// | REQUEST_TIMEOUT_MS | 30000 | Backend request timeout (ms) |
/// | BUSINESS_TIMEZONE | Asia/Jakarta | Zone for "today" / "this week" |
/// | LOG_LEVEL | info | Default log level |
/// | LOG_JSON | false | JSON console logs |
/// | LOG_DIR | (unset) | Directory for rotating log files |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// BACKEND_URL=http://pos.local:3000 BUSINESS_TIMEZONE=Asia/Makassar cashier history
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL
    pub backend_url: String,
    /// Backend request timeout (ms)
    pub request_timeout_ms: u64,
    /// Business time zone
    pub timezone: Tz,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset or unparsable variables use their defaults.
    pub fn from_env() -> Self {
        Self {
            backend_url: std::env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            timezone: std::env::var("BUSINESS_TIMEZONE")
                .map(|name| parse_timezone(&name))
                .unwrap_or(DEFAULT_TIMEZONE),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the backend URL, e.g. from a CLI flag
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Backend client configuration derived from this config
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.backend_url).with_timeout_ms(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
