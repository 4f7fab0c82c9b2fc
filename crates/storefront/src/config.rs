//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BORZFUEL_CMS_URL` - Base URL of the CMS serving `/api/*` (default: <http://localhost:3000>)
//! - `BORZFUEL_REQUEST_TIMEOUT_SECS` - Upper bound for each Account Service call (default: 10)
//! - `BORZFUEL_CATALOG_CACHE_TTL_SECS` - Catalog response cache lifetime (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., production, staging)
//! - `SENTRY_SAMPLE_RATE` - Fraction of error events to send (default: 1.0)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_CMS_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the CMS; API paths are resolved against it
    pub cms_url: Url,
    /// Upper bound for each Account Service call
    pub request_timeout: Duration,
    /// How long catalog responses stay cached
    pub catalog_cache_ttl: Duration,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// DSN; Sentry stays disabled when unset
    pub dsn: Option<SecretString>,
    /// Environment tag attached to events
    pub environment: Option<String>,
    /// Fraction of error events to send
    pub sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cms_url = lookup("BORZFUEL_CMS_URL").unwrap_or_else(|| DEFAULT_CMS_URL.to_string());
        let cms_url = parse_base_url("BORZFUEL_CMS_URL", &cms_url)?;

        let request_timeout = Duration::from_secs(parse_secs(
            &lookup,
            "BORZFUEL_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        let catalog_cache_ttl = Duration::from_secs(parse_secs(
            &lookup,
            "BORZFUEL_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CATALOG_CACHE_TTL_SECS,
        )?);

        let sample_rate = match lookup("SENTRY_SAMPLE_RATE") {
            Some(raw) => raw
                .parse::<f32>()
                .ok()
                .filter(|rate| (0.0..=1.0).contains(rate))
                .ok_or_else(|| {
                    ConfigError::InvalidEnvVar(
                        "SENTRY_SAMPLE_RATE".to_string(),
                        format!("expected a number between 0 and 1, got {raw}"),
                    )
                })?,
            None => 1.0,
        };

        Ok(Self {
            cms_url,
            request_timeout,
            catalog_cache_ttl,
            sentry: SentryConfig {
                dsn: lookup("SENTRY_DSN")
                    .filter(|dsn| !dsn.is_empty())
                    .map(SecretString::from),
                environment: lookup("SENTRY_ENVIRONMENT"),
                sample_rate,
            },
        })
    }

    /// Configuration pointing at a given CMS with default settings.
    #[must_use]
    pub fn for_cms(cms_url: Url) -> Self {
        Self {
            cms_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS),
            sentry: SentryConfig::default(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, forcing a trailing slash so relative joins keep any path prefix.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Parse a positive number of seconds, falling back to a default when unset.
fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}
