use serde_json::Value;

use crate::{
    error::Result,
    http::Transport,
    request::{Endpoint, QuerySpec},
};

use super::SoundCloudClient;

impl<T: Transport> SoundCloudClient<T> {
    /// Searches tracks by free text.
    ///
    /// `limit == 0` lets the API pick its default page size. The reply is a
    /// linked-partitioning page: `{"collection": [...], "next_href": ...}`.
    pub fn search_tracks(&mut self, query: &str, limit: u32) -> Result<Value> {
        self.fetch(QuerySpec::search(Endpoint::SearchTracks, query, limit))
    }

    /// Fetches one track by URN or numeric id.
    pub fn get_track(&mut self, track_urn: &str) -> Result<Value> {
        self.fetch(QuerySpec::new(Endpoint::Track(track_urn.to_string())))
    }

    /// Fetches the stream URLs (`http_mp3_128_url`, `hls_*`, ...) of a track.
    pub fn get_track_streams(&mut self, track_urn: &str) -> Result<Value> {
        self.fetch(QuerySpec::new(Endpoint::TrackStreams(
            track_urn.to_string(),
        )))
    }
}
