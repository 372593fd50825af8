use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;

/// State shared by all handlers.
///
/// Holds the immutable configuration and one HTTP client whose connection
/// pool is reused across requests. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
}

impl AppState {
    /// Builds the state with a client bounded by `config.upstream_timeout`.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(AppState {
            config: Arc::new(config),
            http,
        })
    }
}
