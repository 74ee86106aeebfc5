//! Frontend Configuration
//!
//! Resolved at build time from environment variables, since the bundle has
//! no filesystem or process environment at runtime.

use module_hierarchy::OrderScheme;
use thiserror::Error;
use tracing::Level;

/// Default REST API root
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// How long notifications stay on screen (ms)
pub const DEFAULT_NOTIFICATION_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API base URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
    #[error("unknown order scheme {0:?} (expected \"rank\" or \"nested\")")]
    InvalidOrderScheme(String),
}

/// Frontend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// REST API root, without trailing slash (e.g. "http://localhost:8000/api")
    pub api_base_url: String,
    /// Maximum level written to the browser console
    pub log_level: Level,
    /// How module order values are assigned on reorder
    pub order_scheme: OrderScheme,
    /// Notification display time in milliseconds
    pub notification_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: Level::INFO,
            order_scheme: OrderScheme::SiblingRank,
            notification_ms: DEFAULT_NOTIFICATION_MS,
        }
    }
}

impl AppConfig {
    /// Read `MODULE_TREE_API_URL`, `MODULE_TREE_LOG` and
    /// `MODULE_TREE_ORDER_SCHEME` as they were at build time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            option_env!("MODULE_TREE_API_URL"),
            option_env!("MODULE_TREE_LOG"),
            option_env!("MODULE_TREE_ORDER_SCHEME"),
        )
    }

    /// Build from optional raw values; unset values keep their defaults
    pub fn from_vars(
        api_base_url: Option<&str>,
        log_level: Option<&str>,
        order_scheme: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = api_base_url {
            config = config.with_api_base_url(url)?;
        }
        if let Some(level) = log_level {
            let level = level
                .trim()
                .parse::<Level>()
                .map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))?;
            config = config.with_log_level(level);
        }
        if let Some(scheme) = order_scheme {
            config = config.with_order_scheme(parse_order_scheme(scheme)?);
        }
        Ok(config)
    }

    /// Set the API root
    pub fn with_api_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(url.to_string()));
        }
        self.api_base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_order_scheme(mut self, scheme: OrderScheme) -> Self {
        self.order_scheme = scheme;
        self
    }

    /// Full URL for an API path ("modules" -> "{base}/modules")
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn parse_order_scheme(raw: &str) -> Result<OrderScheme, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "rank" | "sibling" => Ok(OrderScheme::SiblingRank),
        "nested" | "legacy" => Ok(OrderScheme::LEGACY),
        _ => Err(ConfigError::InvalidOrderScheme(raw.to_string())),
    }
}
