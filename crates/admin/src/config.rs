//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the admin dashboard
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BOOTSTRAP_EMAIL` - Email of the initial super admin
//! - `ADMIN_BOOTSTRAP_NAME` - Display name of the initial super admin (default: Admin)
//! - `ADMIN_BOOTSTRAP_PASSWORD_HASH` - Argon2 PHC hash (`dd-cli admin hash-password`)
//! - `ADMIN_CATALOG_PATH` - JSON catalog to load at startup (default: built-in seed data)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! `ADMIN_BOOTSTRAP_EMAIL` and `ADMIN_BOOTSTRAP_PASSWORD_HASH` must be set
//! together. Without them the dashboard starts with no users.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use argon2::PasswordHash;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use dewdrop_core::Email;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin dashboard
    pub base_url: String,
    /// Initial super admin, created at startup
    pub bootstrap: Option<BootstrapAdmin>,
    /// Catalog file to load instead of the seed data
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// The super admin account created when the dashboard starts.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: Email,
    pub name: String,
    /// Argon2 PHC string
    pub password_hash: SecretString,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("ADMIN_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            host,
            port,
            base_url,
            bootstrap: BootstrapAdmin::from_env()?,
            catalog_path: get_optional_env("ADMIN_CATALOG_PATH").map(PathBuf::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl BootstrapAdmin {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let email = get_optional_env("ADMIN_BOOTSTRAP_EMAIL");
        let password_hash = get_optional_env("ADMIN_BOOTSTRAP_PASSWORD_HASH");

        match (email, password_hash) {
            (Some(email), Some(hash)) => Self::new(
                &email,
                get_env_or_default("ADMIN_BOOTSTRAP_NAME", "Admin"),
                SecretString::from(hash),
            )
            .map(Some),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ADMIN_BOOTSTRAP_*".to_string(),
                "ADMIN_BOOTSTRAP_EMAIL and ADMIN_BOOTSTRAP_PASSWORD_HASH must be set together"
                    .to_string(),
            )),
        }
    }

    /// Validate the email and PHC string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` naming the offending variable.
    pub fn new(
        email: &str,
        name: String,
        password_hash: SecretString,
    ) -> Result<Self, ConfigError> {
        let email = Email::parse(email).map_err(|e| {
            ConfigError::InvalidEnvVar("ADMIN_BOOTSTRAP_EMAIL".to_string(), e.to_string())
        })?;
        PasswordHash::new(password_hash.expose_secret()).map_err(|e| {
            ConfigError::InvalidEnvVar("ADMIN_BOOTSTRAP_PASSWORD_HASH".to_string(), e.to_string())
        })?;

        Ok(Self {
            email,
            name,
            password_hash,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
