//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_PATH` - URL prefix the site is deployed under (default: /coffeestore)
//! - `STOREFRONT_BASE_URL` - Public URL; `https://` enables secure cookies (default: <http://127.0.0.1:3000>)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_SESSION_IDLE_MINUTES` - Idle time before a visitor's cart is dropped (default: 120)
//! - `STOREFRONT_MAX_SESSIONS` - Most visitor sessions kept in memory (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BASE_PATH: &str = "/coffeestore";

const DEFAULT_SESSION_IDLE_MINUTES: u64 = 120;
const DEFAULT_MAX_SESSIONS: u64 = 10_000;

/// First path segments the base path may not start with, because the
/// application already routes them at the site root.
const RESERVED_SEGMENTS: &[&str] = &["health"];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
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
    /// URL prefix all pages are served under
    pub base_path: BasePath,
    /// Directory served under `{base_path}/static`
    pub static_dir: PathBuf,
    /// Idle time after which a session and its cart are dropped
    pub session_idle: Duration,
    /// Upper bound on sessions (and carts) held in memory
    pub max_sessions: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Local defaults served from the site root. `from_env` uses `/coffeestore`
/// unless `STOREFRONT_BASE_PATH` says otherwise.
impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://127.0.0.1:3000".to_string(),
            base_path: BasePath::root(),
            static_dir: PathBuf::from("crates/storefront/static"),
            session_idle: Duration::from_secs(DEFAULT_SESSION_IDLE_MINUTES * 60),
            max_sessions: DEFAULT_MAX_SESSIONS,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_env_or_default(&lookup, "STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default(&lookup, "STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default(&lookup, "STOREFRONT_BASE_URL", "http://127.0.0.1:3000");
        let base_path = BasePath::parse(&get_env_or_default(
            &lookup,
            "STOREFRONT_BASE_PATH",
            DEFAULT_BASE_PATH,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_BASE_PATH".to_string(), e))?;
        let static_dir = PathBuf::from(get_env_or_default(
            &lookup,
            "STOREFRONT_STATIC_DIR",
            "crates/storefront/static",
        ));
        let session_idle_minutes = get_env_or_default(
            &lookup,
            "STOREFRONT_SESSION_IDLE_MINUTES",
            &DEFAULT_SESSION_IDLE_MINUTES.to_string(),
        )
        .parse::<u64>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "STOREFRONT_SESSION_IDLE_MINUTES".to_string(),
                "must be a positive number of minutes".to_string(),
            )
        })?;
        let max_sessions = get_env_or_default(
            &lookup,
            "STOREFRONT_MAX_SESSIONS",
            &DEFAULT_MAX_SESSIONS.to_string(),
        )
        .parse::<u64>()
        .ok()
        .filter(|max| *max > 0)
        .ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "STOREFRONT_MAX_SESSIONS".to_string(),
                "must be a positive integer".to_string(),
            )
        })?;

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_sample_rate(&lookup, "SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = get_sample_rate(&lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            host,
            port,
            base_url,
            base_path,
            static_dir,
            session_idle: Duration::from_secs(session_idle_minutes.saturating_mul(60)),
            max_sessions,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` flag.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// URL prefix the storefront is mounted under.
///
/// Stored without a trailing slash; the root path is stored as "".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasePath(String);

impl BasePath {
    /// The site root.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Normalize a configured base path.
    ///
    /// Leading and trailing slashes are optional, so `coffeestore`,
    /// `/coffeestore` and `/coffeestore/` are equivalent. An empty value or
    /// `/` means the site root.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if a segment contains characters
    /// that are not allowed in a path prefix, or if the path starts with a
    /// segment the application routes itself (`/health`).
    pub fn parse(raw: &str) -> Result<Self, String> {
        let segments: Vec<&str> = raw.trim().split('/').filter(|s| !s.is_empty()).collect();

        if let Some(bad) = segments.iter().find(|s| {
            !s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        }) {
            return Err(format!("invalid path segment '{bad}'"));
        }

        if let Some(first) = segments
            .first()
            .filter(|first| RESERVED_SEGMENTS.contains(*first))
        {
            return Err(format!("'/{first}' is reserved for health checks"));
        }

        if segments.is_empty() {
            return Ok(Self::root());
        }

        Ok(Self(format!("/{}", segments.join("/"))))
    }

    /// The prefix without a trailing slash ("" for the root).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Absolute URL path for a route below the base path.
    ///
    /// `path` must start with `/`.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get a Sentry sample rate, which must lie in `0.0..=1.0`.
fn get_sample_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }

    Ok(rate)
}
