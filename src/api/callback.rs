use axum::{
    Extension,
    extract::{Query, rejection::QueryRejection},
    response::{IntoResponse, Response},
};

use crate::{
    error::RelayError,
    spotify::auth::{error_redirect, exchange_code, token_redirect},
    state::AppState,
    types::CallbackParams,
    warning,
};

use super::found;

pub async fn callback(
    params: Result<Query<CallbackParams>, QueryRejection>,
    Extension(state): Extension<AppState>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return RelayError::InvalidInput(rejection.body_text()).into_response();
        }
    };

    // user denied consent or Spotify refused the request
    if let Some(error) = params.error {
        warning!("Authorization denied: {}", error);
        return found(&error_redirect(&state.config, &error));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return RelayError::InvalidInput("missing code query parameter".to_string())
            .into_response();
    };

    match exchange_code(&state.http, &state.config, &code).await {
        Ok(token) => found(&token_redirect(&state.config, &token)),
        Err(e @ RelayError::TokenExtractionFailure(_)) => {
            warning!("{}", e);
            found(&error_redirect(&state.config, e.kind()))
        }
        Err(e) => e.into_response(),
    }
}
