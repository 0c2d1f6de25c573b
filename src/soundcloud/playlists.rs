use serde_json::Value;

use crate::{
    error::Result,
    http::Transport,
    request::{Endpoint, QuerySpec},
};

use super::SoundCloudClient;

impl<T: Transport> SoundCloudClient<T> {
    /// Searches playlists by free text. With `show_tracks` each playlist in
    /// the page carries its track list, which makes the reply much larger.
    pub fn search_playlists(&mut self, query: &str, limit: u32, show_tracks: bool) -> Result<Value> {
        self.fetch(
            QuerySpec::search(Endpoint::SearchPlaylists, query, limit).show_tracks(show_tracks),
        )
    }

    pub fn get_playlist(&mut self, playlist_urn: &str, show_tracks: bool) -> Result<Value> {
        self.fetch(
            QuerySpec::new(Endpoint::Playlist(playlist_urn.to_string())).show_tracks(show_tracks),
        )
    }
}
