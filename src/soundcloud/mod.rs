//! # SoundCloud API
//!
//! Read-only access to the SoundCloud HTTP API through [`SoundCloudClient`].
//!
//! ```text
//! operation (search_tracks, get_playlist, ...)
//!          ↓
//! RequestBuilder  →  bounded URL, percent-encoded parameters
//!          ↓
//! TokenManager    →  fresh token, or refresh → client credentials
//!          ↓
//! Transport       →  GET with `Authorization: Bearer <token>`
//!          ↓
//! serde_json::Value
//! ```
//!
//! The operations are grouped by resource:
//!
//! - [`tracks`] - track search, single track, stream URLs
//! - [`users`] - user search, a user's uploads and likes
//! - [`playlists`] - playlist search and single playlist
//!
//! Anything not covered can be reached with
//! [`SoundCloudClient::custom_get`], and paged search results can be walked
//! with [`SoundCloudClient::next_page`].
//!
//! Non-200 replies come back as [`Error::Status`](crate::Error::Status);
//! nothing is retried apart from the token renewal described on
//! [`TokenManager::ensure_valid`](crate::management::TokenManager::ensure_valid).

mod client;
pub mod playlists;
pub mod tracks;
pub mod users;

pub use client::SoundCloudClient;
