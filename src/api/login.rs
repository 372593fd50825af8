use axum::{Extension, response::Response};

use crate::{spotify, state::AppState};

use super::found;

/// Sends the browser to the Spotify consent page.
pub async fn login(Extension(state): Extension<AppState>) -> Response {
    found(&spotify::auth::authorize_url(&state.config))
}
