//! # Spotify Integration Module
//!
//! This module implements the server side of the Spotify authorization code
//! flow for the browser client. It is a one-shot relay: the relay never stores
//! tokens, refreshes them, or keeps sessions.
//!
//! ## Flow
//!
//! ```text
//! Browser ── GET /login ──▶ relay ── 302 ──▶ accounts.spotify.com/authorize
//!                                                       │ user consents
//! Browser ◀── 302 ── accounts.spotify.com ── /callback?code=... ──▶ relay
//!                                                       │
//!                     relay ── POST /api/token (Basic auth) ──▶ Spotify
//!                                                       │
//! Browser ◀── 302 <frontend>?access_token=... ── relay ─┘
//! ```
//!
//! ## Error Handling
//!
//! - **Transport failures** while exchanging the code are returned as a JSON
//!   error body by the callback handler.
//! - **Token responses without a string `access_token`** (for example
//!   `{"error": "invalid_grant"}` for a stale code) become a
//!   `TokenExtractionFailure`, which the callback turns into a redirect back to
//!   the frontend with an `error` query parameter.
//!
//! ## Configuration Integration
//!
//! Client id, client secret, redirect URI and both endpoints come from
//! [`Config`](crate::config::Config); the scope list is fixed by the player
//! features the browser client needs (Web Playback SDK and playback control).

pub mod auth;
