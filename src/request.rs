//! URL construction for the resource endpoints.
//!
//! Every URL is built into a fresh `String` and checked against a fixed
//! capacity before it is handed to the transport. Query parameters are
//! appended in a fixed order (`q`, `show_tracks`, `limit`,
//! `linked_partitioning`) so identical inputs always produce identical URLs.

use log::debug;

use crate::{
    encoding,
    error::{Error, Result},
};

pub const SOUNDCLOUD_API_URL: &str = "https://api.soundcloud.com";

/// Upper bound on any URL the client will send.
pub const MAX_URL_LEN: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    SearchTracks,
    SearchUsers,
    SearchPlaylists,
    Track(String),
    TrackStreams(String),
    Playlist(String),
    UserTracks(String),
    UserLikedTracks(String),
}

impl Endpoint {
    /// Path below the API base, with the resource id percent-encoded.
    fn path(&self) -> String {
        match self {
            Endpoint::SearchTracks => "/tracks".to_string(),
            Endpoint::SearchUsers => "/users".to_string(),
            Endpoint::SearchPlaylists => "/playlists".to_string(),
            Endpoint::Track(id) => format!("/tracks/{}", encoding::encode(id)),
            Endpoint::TrackStreams(id) => format!("/tracks/{}/streams", encoding::encode(id)),
            Endpoint::Playlist(id) => format!("/playlists/{}", encoding::encode(id)),
            Endpoint::UserTracks(id) => format!("/users/{}/tracks", encoding::encode(id)),
            Endpoint::UserLikedTracks(id) => {
                format!("/users/{}/likes/tracks", encoding::encode(id))
            }
        }
    }
}

/// One request's worth of endpoint and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub endpoint: Endpoint,
    pub query: Option<String>,
    pub show_tracks: Option<bool>,
    /// `0` leaves the parameter out.
    pub limit: u32,
    pub linked_partitioning: bool,
}

impl QuerySpec {
    pub fn new(endpoint: Endpoint) -> Self {
        QuerySpec {
            endpoint,
            query: None,
            show_tracks: None,
            limit: 0,
            linked_partitioning: false,
        }
    }

    /// Free-text search; the API pages these with `linked_partitioning`.
    pub fn search(endpoint: Endpoint, query: &str, limit: u32) -> Self {
        QuerySpec {
            query: Some(query.to_string()),
            limit,
            linked_partitioning: true,
            ..Self::new(endpoint)
        }
    }

    pub fn show_tracks(mut self, show_tracks: bool) -> Self {
        self.show_tracks = Some(show_tracks);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_base: String,
    max_len: usize,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(SOUNDCLOUD_API_URL, MAX_URL_LEN)
    }
}

impl RequestBuilder {
    pub fn new(api_base: impl Into<String>, max_len: usize) -> Self {
        let api_base: String = api_base.into();
        RequestBuilder {
            api_base: api_base.trim_end_matches('/').to_string(),
            max_len,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn build(&self, spec: &QuerySpec) -> Result<String> {
        let mut url = format!("{}{}", self.api_base, spec.endpoint.path());
        let mut params: Vec<String> = Vec::new();

        if let Some(query) = &spec.query {
            params.push(format!("q={}", encoding::encode(query)));
        }
        if let Some(show_tracks) = spec.show_tracks {
            params.push(format!("show_tracks={}", show_tracks));
        }
        if spec.limit > 0 {
            params.push(format!("limit={}", spec.limit));
        }
        if spec.linked_partitioning {
            params.push("linked_partitioning=true".to_string());
        }

        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        self.check_len(&url)?;
        debug!("Built request URL {}", url);
        Ok(url)
    }

    pub fn check_len(&self, url: &str) -> Result<()> {
        if url.len() > self.max_len {
            return Err(Error::LengthExceeded {
                len: url.len(),
                max: self.max_len,
            });
        }
        Ok(())
    }
}
