//! # API Module
//!
//! HTTP handlers of the AI radio relay.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /login`, redirects the browser to Spotify's consent page.
//! - [`callback`] - `GET /callback`, exchanges the authorization code for an
//!   access token and redirects the browser to the frontend with it.
//!
//! ### Playlist
//!
//! - [`generate_tracks`] - `POST /api/generate-tracks`, turns a free-text
//!   prompt into a list of songs through the chat-completion API.
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, reports status and version.
//!
//! ## State
//!
//! Handlers receive [`AppState`](crate::state::AppState) through an axum
//! `Extension` layer and never read the process environment themselves.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::{get, post}};
//! use airadio::api;
//!
//! let app = Router::new()
//!     .route("/login", get(api::login))
//!     .route("/callback", get(api::callback))
//!     .route("/api/generate-tracks", post(api::generate_tracks))
//!     .layer(Extension(state));
//! ```

mod callback;
mod generate;
mod health;
mod login;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub use callback::callback;
pub use generate::generate_tracks;
pub use health::health;
pub use login::login;

/// `302 Found` to `location`.
///
/// axum's `Redirect` only offers 303, 307 and 308; the browser flow expects
/// a plain 302.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
