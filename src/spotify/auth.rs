use reqwest::Client;
use serde_json::Value;

use crate::{config::Config, error::RelayError, utils};

/// Permissions requested from the user.
///
/// `streaming` and the playback scopes are required by the Web Playback SDK
/// running in the browser client.
pub const SCOPES: &str =
    "user-read-private user-read-email streaming user-modify-playback-state user-read-playback-state";

/// Builds the authorization URL the browser is sent to by `/login`.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config);
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
/// ```
pub fn authorize_url(config: &Config) -> String {
    utils::append_query(
        &config.spotify_auth_url,
        &[
            ("response_type", "code"),
            ("client_id", &config.spotify_client_id),
            ("scope", SCOPES),
            ("redirect_uri", &config.spotify_redirect_uri),
        ],
    )
}

/// Exchanges an authorization code for an access token.
///
/// Completes the authorization code flow by posting the code to the token
/// endpoint with the client credentials in a Basic auth header.
///
/// # Arguments
///
/// * `http` - Shared client; its timeout bounds the call
/// * `config` - Provides client credentials, redirect URI and token endpoint
/// * `code` - Authorization code received on `/callback`
///
/// # Returns
///
/// The access token on success.
///
/// # Errors
///
/// - `UpstreamUnreachable` / `UpstreamTimeout` if the token endpoint cannot be reached
/// - `TokenExtractionFailure` if the response carries no string `access_token`
///
/// # Security Note
///
/// The authorization code is single-use and expires quickly, so the exchange
/// happens immediately and is never retried.
pub async fn exchange_code(
    http: &Client,
    config: &Config,
    code: &str,
) -> Result<String, RelayError> {
    let res = http
        .post(&config.spotify_token_url)
        .basic_auth(
            &config.spotify_client_id,
            Some(&config.spotify_client_secret),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.spotify_redirect_uri.as_str()),
        ])
        .send()
        .await?;

    // Spotify answers 400 with an error document for bad codes; the shape
    // check below handles that, so the status is not inspected.
    let bytes = res.bytes().await?;

    extract_access_token(&bytes)
}

/// Reads `access_token` from a token response body.
///
/// The value must be present and a non-empty string. A provider `error`
/// field, if any, is carried into the failure message.
pub fn extract_access_token(bytes: &[u8]) -> Result<String, RelayError> {
    let json: Value = serde_json::from_slice(bytes).map_err(|e| {
        RelayError::TokenExtractionFailure(format!("token response is not JSON: {}", e))
    })?;

    match json.get("access_token") {
        Some(Value::String(token)) if !token.is_empty() => Ok(token.clone()),
        Some(Value::String(_)) => Err(RelayError::TokenExtractionFailure(
            "access_token is empty".to_string(),
        )),
        Some(_) => Err(RelayError::TokenExtractionFailure(
            "access_token is not a string".to_string(),
        )),
        None => match json["error"].as_str() {
            Some(provider_error) => Err(RelayError::TokenExtractionFailure(format!(
                "provider returned '{}'",
                provider_error
            ))),
            None => Err(RelayError::TokenExtractionFailure(
                "access_token missing from token response".to_string(),
            )),
        },
    }
}

/// Frontend URL carrying a freshly obtained token.
pub fn token_redirect(config: &Config, access_token: &str) -> String {
    utils::append_query(&config.frontend_url, &[("access_token", access_token)])
}

/// Frontend URL reporting a failed login.
pub fn error_redirect(config: &Config, error: &str) -> String {
    utils::append_query(&config.frontend_url, &[("error", error)])
}
