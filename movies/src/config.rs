//! Data-layer configuration loaded via OrthoConfig.
//!
//! Values come from defaults, an optional config file and `MOVIES_*`
//! environment variables, in increasing precedence. The `movies` binary
//! loads them without forwarding its own flags.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::OnlineFailurePolicy;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/";
const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_DIR_NAME: &str = "movies-cache";

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_CACHE_DIR_NAME)
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A configured URL does not parse.
    #[error("{field} is not a valid URL: {message}")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Parser diagnostic.
        message: String,
    },
    /// The request timeout must be at least one second.
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Configuration values for the movie data layer.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MOVIES")]
pub struct MoviesSettings {
    /// Base URL of the catalogue API; `movies` is resolved against it.
    pub api_base_url: Option<String>,
    /// Optional bearer token sent to the catalogue API.
    pub api_token: Option<String>,
    /// Request timeout for catalogue calls, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Directory holding the cached snapshot.
    pub cache_dir: Option<PathBuf>,
    /// Serve the cache when an online fetch fails.
    #[ortho_config(default = false)]
    pub fallback_to_cache: bool,
    /// Image host prefix combined with poster paths for display.
    pub poster_base_url: Option<String>,
}

impl MoviesSettings {
    /// Return the parsed API base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the value does not parse.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "api_base_url",
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )
    }

    /// Return the parsed poster base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the value does not parse.
    pub fn poster_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "poster_base_url",
            self.poster_base_url
                .as_deref()
                .unwrap_or(DEFAULT_POSTER_BASE_URL),
        )
    }

    /// Return the request timeout, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Return the cache directory, falling back to the default.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    /// Return the configured online-failure policy.
    #[must_use]
    pub const fn online_failure_policy(&self) -> OnlineFailurePolicy {
        if self.fallback_to_cache {
            OnlineFailurePolicy::FallBackToCache
        } else {
            OnlineFailurePolicy::Terminal
        }
    }

    /// Return the bearer token when one is configured and non-blank.
    #[must_use]
    pub fn api_token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw.trim()).map_err(|error| SettingsError::InvalidUrl {
        field,
        message: error.to_string(),
    })
}
