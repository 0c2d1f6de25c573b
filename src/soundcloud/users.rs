use serde_json::Value;

use crate::{
    error::Result,
    http::Transport,
    request::{Endpoint, QuerySpec},
};

use super::SoundCloudClient;

impl<T: Transport> SoundCloudClient<T> {
    pub fn search_users(&mut self, query: &str, limit: u32) -> Result<Value> {
        self.fetch(QuerySpec::search(Endpoint::SearchUsers, query, limit))
    }

    /// Tracks uploaded by a user. `limit == 0` omits the parameter.
    pub fn user_tracks(&mut self, user_urn: &str, limit: u32) -> Result<Value> {
        self.fetch(QuerySpec::new(Endpoint::UserTracks(user_urn.to_string())).limit(limit))
    }

    /// Tracks a user has liked. `limit == 0` omits the parameter.
    pub fn user_liked_tracks(&mut self, user_urn: &str, limit: u32) -> Result<Value> {
        self.fetch(QuerySpec::new(Endpoint::UserLikedTracks(user_urn.to_string())).limit(limit))
    }
}
