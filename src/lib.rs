//! AI Radio Relay Library
//!
//! This library implements the backend relay used by the AI radio browser
//! client. It exposes a Spotify login/callback flow and a prompt-to-playlist
//! endpoint backed by a chat-completion API, reshaping vendor responses into
//! small JSON documents for the browser.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the relay endpoints
//! - `config` - Configuration loading from `.env` files and environment variables
//! - `error` - Relay error kinds and their HTTP mapping
//! - `openai` - Chat-completion client and track list parsing
//! - `server` - Router assembly, CORS and request logging
//! - `spotify` - Spotify authorize URL and token exchange
//! - `state` - Shared handler state (configuration and HTTP client)
//! - `types` - Data structures for inbound and outbound payloads
//! - `utils` - Small URL helpers
//!
//! # Example
//!
//! ```
//! use airadio::{config, server, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> airadio::Res<()> {
//!     config::load_env();
//!     let state = AppState::new(config::Config::from_env()?)?;
//!     server::start_api_server(state).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod openai;
pub mod server;
pub mod spotify;
pub mod state;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used on startup paths (configuration, binding, serving) where any error is
/// fatal. Request handling uses [`error::RelayError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal startup errors. Request handlers must never call it;
/// they return a [`error::RelayError`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to bind {}: {}", addr, e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for misconfiguration that does not prevent startup and for failed
/// upstream calls.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
