use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{types::ErrorBody, warning};

/// Everything that can go wrong while relaying a request.
///
/// Each variant has a stable machine-readable [`kind`](RelayError::kind) that
/// is returned to the client next to the human-readable message.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Client-supplied data is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure talking to a vendor (DNS, TLS, connection refused).
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The outbound call exceeded the configured deadline.
    #[error("Upstream did not answer in time")]
    UpstreamTimeout,

    /// The vendor rejected our credentials.
    #[error("Upstream rejected credentials (status {0})")]
    UpstreamAuthFailure(u16),

    /// The vendor answered with a non-success status other than an auth failure.
    #[error("Upstream returned status {status}: {message}")]
    UpstreamRejected { status: u16, message: String },

    /// The chat-completion envelope is not valid JSON of the expected shape.
    #[error("Failed to parse completion response: {0}")]
    UpstreamMalformedEnvelope(String),

    /// The chat-completion envelope carries no choices.
    #[error("Completion response contained no choices")]
    UpstreamEmptyChoices,

    /// The model's content is not a JSON array of title/artist objects.
    #[error("Failed to parse song list: {0}")]
    MalformedTrackPayload(String),

    /// The token response has no string `access_token`.
    #[error("Token exchange failed: {0}")]
    TokenExtractionFailure(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamUnreachable(_)
            | Self::UpstreamTimeout
            | Self::UpstreamAuthFailure(_)
            | Self::UpstreamRejected { .. }
            | Self::UpstreamMalformedEnvelope(_)
            | Self::UpstreamEmptyChoices
            | Self::MalformedTrackPayload(_)
            | Self::TokenExtractionFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::UpstreamUnreachable(_) => "upstream_unreachable",
            Self::UpstreamTimeout => "upstream_timeout",
            Self::UpstreamAuthFailure(_) => "upstream_auth_failure",
            Self::UpstreamRejected { .. } => "upstream_rejected",
            Self::UpstreamMalformedEnvelope(_) => "upstream_malformed_envelope",
            Self::UpstreamEmptyChoices => "upstream_empty_choices",
            Self::MalformedTrackPayload(_) => "malformed_track_payload",
            Self::TokenExtractionFailure(_) => "token_extraction_failure",
        }
    }

    /// Maps a reqwest failure onto the transport error kinds.
    ///
    /// Status-code errors never reach this function because the relay checks
    /// statuses itself.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::UpstreamTimeout
        } else {
            Self::UpstreamUnreachable(err.to_string())
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::from_transport(err)
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            warning!("{} ({})", self, self.kind());
        }

        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
