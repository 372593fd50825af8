use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    config::Config,
    error::RelayError,
    types::{ChatCompletionEnvelope, ChatCompletionRequest, ChatMessage, Track},
};

/// Instruction sent as the first turn of every completion request.
pub const SYSTEM_PROMPT: &str = "You are a music expert. Given a user's mood or request, return only a JSON array of 10 songs that match the vibe. Each song must include 'title' and 'artist'. Format it as valid JSON.";

/// Upper bound on how much of an upstream error body ends up in a message.
pub const MAX_ERROR_BODY: usize = 200;

/// Builds the two-turn completion request for `prompt`.
///
/// The prompt is forwarded as-is; the output format is only requested from
/// the model, never enforced here.
pub fn build_request(model: &str, prompt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            },
        ],
    }
}

/// Asks the completion provider for songs matching `prompt`.
///
/// # Arguments
///
/// * `http` - Shared client; its timeout bounds the whole call
/// * `config` - Provides endpoint, model and API key
/// * `prompt` - Raw user prompt
///
/// # Returns
///
/// The track list exactly as the model produced it.
///
/// # Errors
///
/// - `UpstreamUnreachable` / `UpstreamTimeout` when the call itself fails
/// - `UpstreamAuthFailure` on 401 or 403 (e.g. missing or wrong API key)
/// - `UpstreamRejected` on any other non-success status
/// - `UpstreamMalformedEnvelope`, `UpstreamEmptyChoices` or
///   `MalformedTrackPayload` when the response cannot be reshaped
pub async fn generate_tracks(
    http: &Client,
    config: &Config,
    prompt: &str,
) -> Result<Vec<Track>, RelayError> {
    let body = build_request(&config.openai_model, prompt);

    let mut request = http.post(&config.openai_api_url).json(&body);
    if let Some(key) = &config.openai_api_key {
        request = request.bearer_auth(key);
    }

    let res = request.send().await?;
    let status = res.status();
    // read the body on every path so the connection goes back to the pool
    let bytes = res.bytes().await?;

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(RelayError::UpstreamAuthFailure(status.as_u16()));
    }

    if !status.is_success() {
        return Err(RelayError::UpstreamRejected {
            status: status.as_u16(),
            message: upstream_message(&bytes),
        });
    }

    let envelope = parse_envelope(&bytes)?;
    let content = first_content(envelope)?;
    parse_tracks(&content)
}

/// Decodes the outer completion document.
pub fn parse_envelope(bytes: &[u8]) -> Result<ChatCompletionEnvelope, RelayError> {
    serde_json::from_slice(bytes).map_err(|e| RelayError::UpstreamMalformedEnvelope(e.to_string()))
}

/// Decodes the model's content into tracks.
///
/// Expects a JSON array of objects with string `title` and `artist` fields.
/// Extra fields are ignored, order is kept and nothing is deduplicated.
pub fn parse_tracks(content: &str) -> Result<Vec<Track>, RelayError> {
    serde_json::from_str(content).map_err(|e| RelayError::MalformedTrackPayload(e.to_string()))
}

/// Takes the content of the first choice.
///
/// A choice without content (a refusal) is a `MalformedTrackPayload`: the
/// envelope is fine, the model just produced no track list.
pub fn first_content(envelope: ChatCompletionEnvelope) -> Result<String, RelayError> {
    let message = envelope
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or(RelayError::UpstreamEmptyChoices)?;

    match message.content {
        Some(content) => Ok(content),
        None => Err(RelayError::MalformedTrackPayload(match message.refusal {
            Some(refusal) => format!("model refused: {}", refusal),
            None => "completion carried no content".to_string(),
        })),
    }
}

/// Picks a readable message out of an upstream error body.
///
/// Understands `{"error": {"message": ...}}` and `{"error": "..."}`, otherwise
/// falls back to a truncated copy of the raw body.
pub fn upstream_message(bytes: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<Value>(bytes) {
        if let Some(message) = json["error"]["message"].as_str() {
            return message.to_string();
        }
        if let Some(message) = json["error"].as_str() {
            return message.to_string();
        }
    }

    String::from_utf8_lossy(bytes)
        .chars()
        .take(MAX_ERROR_BODY)
        .collect()
}
