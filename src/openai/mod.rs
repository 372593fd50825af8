//! # OpenAI Integration Module
//!
//! This module turns a free-text mood or request into a list of songs by
//! asking a chat-completion model for a JSON playlist.
//!
//! ## Overview
//!
//! The pipeline is a two-hop translator:
//!
//! ```text
//! PromptRequest { prompt }
//!          ↓
//! ChatCompletionRequest { model, messages: [system, user] }
//!          ↓  POST (bearer auth)
//! ChatCompletionEnvelope { choices: [ { message: { content } } ] }
//!          ↓  choices[0].content is itself JSON
//! Vec<Track> { title, artist }
//! ```
//!
//! ## Failure Points
//!
//! Every hop maps to its own [`RelayError`](crate::error::RelayError) kind:
//! - transport failures and deadlines (`UpstreamUnreachable`, `UpstreamTimeout`)
//! - rejected credentials and other error statuses (`UpstreamAuthFailure`, `UpstreamRejected`)
//! - an envelope of the wrong shape (`UpstreamMalformedEnvelope`)
//! - an envelope without choices (`UpstreamEmptyChoices`)
//! - model output that is not a track array (`MalformedTrackPayload`)
//!
//! The model is asked for exactly ten songs but the list is passed through
//! as returned, whatever its length.

pub mod completion;

pub use completion::{build_request, first_content, generate_tracks, parse_envelope, parse_tracks};
