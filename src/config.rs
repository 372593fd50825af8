//! Configuration management for the AI radio relay.
//!
//! Configuration is read once at startup into a [`Config`] value which is then
//! handed to every handler. Nothing in the request path reads the process
//! environment.
//!
//! Values are resolved in this order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/airadio/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

/// Default chat-completion endpoint.
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default chat-completion model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
/// Default Spotify authorize endpoint.
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
/// Default Spotify token endpoint.
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Default address of the browser client that receives the token.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
/// Default listening port.
pub const DEFAULT_PORT: u16 = 8888;
/// Default deadline for a single outbound call, in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Errors raised while building a [`Config`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid port number, got '{value}'")]
    InvalidPort { key: &'static str, value: String },

    #[error("{key} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { key: &'static str, value: String },
}

/// Runtime configuration of the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer credential for the chat-completion provider. Not validated
    /// locally; a missing key surfaces as an upstream auth failure.
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub openai_model: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    /// Must match the redirect URI registered with the Spotify application.
    pub spotify_redirect_uri: String,
    pub spotify_auth_url: String,
    pub spotify_token_url: String,
    /// Where `/callback` sends the browser once the exchange is done.
    pub frontend_url: String,
    pub port: u16,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai_api_key: None,
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            spotify_client_id: String::new(),
            spotify_client_secret: String::new(),
            spotify_redirect_uri: String::new(),
            spotify_auth_url: DEFAULT_SPOTIFY_AUTH_URL.to_string(),
            spotify_token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: DEFAULT_PORT,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first so `.env` files are taken into account.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `PORT` or `UPSTREAM_TIMEOUT_SECS` is set
    /// but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated like unset ones. Every key not found falls
    /// back to its default.
    ///
    /// # Example
    ///
    /// ```
    /// use airadio::config::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "PORT" => Some("9000".to_string()),
    ///     _ => None,
    /// })?;
    /// assert_eq!(config.port, 9000);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let port = match get("PORT") {
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::InvalidPort { key: "PORT", value }),
            },
            None => defaults.port,
        };

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        key: "UPSTREAM_TIMEOUT_SECS",
                        value,
                    });
                }
            },
            None => defaults.upstream_timeout,
        };

        Ok(Config {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_api_url: get("OPENAI_API_URL").unwrap_or(defaults.openai_api_url),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            spotify_client_id: get("SPOTIFY_CLIENT_ID").unwrap_or_default(),
            spotify_client_secret: get("SPOTIFY_CLIENT_SECRET").unwrap_or_default(),
            spotify_redirect_uri: get("REDIRECT_URI").unwrap_or_default(),
            spotify_auth_url: get("SPOTIFY_AUTH_URL").unwrap_or(defaults.spotify_auth_url),
            spotify_token_url: get("SPOTIFY_TOKEN_URL").unwrap_or(defaults.spotify_token_url),
            frontend_url: get("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            port,
            upstream_timeout,
        })
    }

    /// Names of settings that are empty but needed by some endpoint.
    ///
    /// The relay still starts without them; the affected endpoint then fails
    /// on the vendor side, so these are only worth a warning at startup.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai_api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if self.spotify_client_id.is_empty() {
            missing.push("SPOTIFY_CLIENT_ID");
        }
        if self.spotify_client_secret.is_empty() {
            missing.push("SPOTIFY_CLIENT_SECRET");
        }
        if self.spotify_redirect_uri.is_empty() {
            missing.push("REDIRECT_URI");
        }
        missing
    }
}

/// Loads environment variables from `.env` files.
///
/// Looks in the current working directory first, then in the platform-specific
/// local data directory under `airadio/.env`. Both files are optional and
/// neither overrides variables that are already set.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/airadio/.env`
/// - macOS: `~/Library/Application Support/airadio/.env`
/// - Windows: `%LOCALAPPDATA%/airadio/.env`
///
/// # Returns
///
/// The paths of the files that were actually loaded.
pub fn load_env() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenv::dotenv() {
        loaded.push(path);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("airadio/.env");
    if path.is_file() && dotenv::from_path(&path).is_ok() {
        loaded.push(path);
    }

    loaded
}
