use axum::{Extension, Json, body::Bytes};

use crate::{
    error::RelayError,
    openai,
    state::AppState,
    types::{PromptRequest, SongsResponse},
};

/// Turns `{prompt}` into `{songs: [{title, artist}, ...]}`.
///
/// Any body that does not decode, whatever its content type, is an
/// `invalid_input` error and nothing is sent upstream.
pub async fn generate_tracks(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<SongsResponse>, RelayError> {
    let input: PromptRequest =
        serde_json::from_slice(&body).map_err(|e| RelayError::InvalidInput(e.to_string()))?;

    let songs = openai::generate_tracks(&state.http, &state.config, &input.prompt).await?;

    Ok(Json(SongsResponse { songs }))
}
