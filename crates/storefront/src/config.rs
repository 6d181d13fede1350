//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_STORE` - Commerce platform store domain (e.g., sable-atelier.myshopify.com)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `GATE_CODE` - Access code for the buyers-only gate (gate disabled when unset)
//! - `GATE_REDIRECT_URL` - Where a successful gate entry redirects (default: /collections/preorder)
//! - `GATED_COLLECTIONS` - Comma-separated collection handles behind the gate
//! - `POPUP_DELAY_MS` - Newsletter popup open delay (default: 4000)
//! - `POPUP_COOKIE_DAYS` - Newsletter dismissal cookie lifetime (default: 7)
//! - `PREORDER_GUIDE_URL` - PDF target for the preorder info modal
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Commerce platform configuration
    pub shop: ShopConfig,
    /// Buyers-only access gate configuration
    pub gate: GateConfig,
    /// Newsletter popup configuration
    pub popup: PopupConfig,
    /// PDF target for the preorder info modal
    pub preorder_guide_url: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Commerce platform configuration.
///
/// The platform exposes cart and predictive-search endpoints on the store
/// domain; all client calls are built from this base.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Store domain (e.g., sable-atelier.myshopify.com)
    pub store: String,
}

impl ShopConfig {
    /// Base URL for the platform's AJAX endpoints.
    #[must_use]
    pub fn ajax_base_url(&self) -> String {
        format!("https://{}", self.store)
    }

    /// URL of the hosted cart/checkout page.
    #[must_use]
    pub fn cart_url(&self) -> String {
        format!("https://{}/cart", self.store)
    }
}

/// Buyers-only access gate configuration.
///
/// The gate is a cosmetic deterrent, not a security boundary: it keeps a
/// preorder collection out of casual view, nothing more. Real access control
/// would have to live behind authentication.
#[derive(Clone)]
pub struct GateConfig {
    /// The access code. `None` disables the gate entirely.
    pub code: Option<SecretString>,
    /// Where a successful entry redirects.
    pub redirect_url: String,
    /// Collection handles that require gate access.
    pub gated_collections: Vec<String>,
}

impl GateConfig {
    /// Whether the gate is active.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.code.is_some()
    }

    /// Whether a collection handle is behind the gate.
    #[must_use]
    pub fn is_gated(&self, handle: &str) -> bool {
        self.enabled() && self.gated_collections.iter().any(|h| h == handle)
    }

    /// Compare a submitted code against the configured one.
    ///
    /// Case-insensitive, surrounding whitespace ignored, matching how shop
    /// staff hand the code out.
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.as_ref().is_some_and(|code| {
            submitted.trim().eq_ignore_ascii_case(code.expose_secret().trim())
        })
    }
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("code", &self.code.as_ref().map(|_| "[REDACTED]"))
            .field("redirect_url", &self.redirect_url)
            .field("gated_collections", &self.gated_collections)
            .finish()
    }
}

/// Newsletter popup configuration, surfaced to the page as data attributes.
#[derive(Debug, Clone)]
pub struct PopupConfig {
    /// Delay before the popup opens, in milliseconds.
    pub delay_ms: u64,
    /// Dismissal cookie lifetime, in days.
    pub cookie_days: u32,
}

impl PopupConfig {
    /// Dismissal cookie lifetime in seconds, for the `Max-Age` attribute.
    #[must_use]
    pub const fn cookie_max_age_secs(&self) -> u64 {
        self.cookie_days as u64 * 24 * 60 * 60
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;

        let shop = ShopConfig {
            store: get_required_env("SHOP_STORE")?,
        };

        let redirect_url =
            get_env_or_default("GATE_REDIRECT_URL", "/collections/preorder");
        validate_redirect_url("GATE_REDIRECT_URL", &redirect_url)?;

        let gate = GateConfig {
            code: get_optional_env("GATE_CODE").map(SecretString::from),
            redirect_url,
            gated_collections: parse_handle_list(
                &get_env_or_default("GATED_COLLECTIONS", ""),
            ),
        };

        let popup = PopupConfig {
            delay_ms: get_env_or_default("POPUP_DELAY_MS", "4000")
                .parse::<u64>()
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("POPUP_DELAY_MS".to_string(), e.to_string())
                })?,
            cookie_days: get_env_or_default("POPUP_COOKIE_DAYS", "7")
                .parse::<u32>()
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("POPUP_COOKIE_DAYS".to_string(), e.to_string())
                })?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            shop,
            gate,
            popup,
            preorder_guide_url: get_optional_env("PREORDER_GUIDE_URL"),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a comma-separated list of collection handles.
fn parse_handle_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from)
        .collect()
}

/// Validate that a redirect target is an absolute path or a full URL.
///
/// Rejects values like `example.com/page` that a browser would treat as a
/// relative path.
fn validate_redirect_url(var_name: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with('/') || url::Url::parse(value).is_ok() {
        return Ok(());
    }
    Err(ConfigError::InvalidEnvVar(
        var_name.to_string(),
        format!("must be an absolute path or full URL, got '{value}'"),
    ))
}
