use crate::error;

use super::{connect, spinner};

#[derive(Debug, Clone)]
pub enum Resource {
    Track(String),
    Streams(String),
    Playlist { urn: String, show_tracks: bool },
    Url(String),
}

/// Fetches a single resource and prints it as pretty JSON.
pub fn show(resource: Resource) {
    let mut client = connect();

    let pb = spinner("Fetching...");
    let result = match &resource {
        Resource::Track(urn) => client.get_track(urn),
        Resource::Streams(urn) => client.get_track_streams(urn),
        Resource::Playlist { urn, show_tracks } => client.get_playlist(urn, *show_tracks),
        Resource::Url(url) => client.custom_get(url),
    };
    pb.finish_and_clear();

    let doc = match result {
        Ok(doc) => doc,
        Err(e) => error!("Request failed. Err: {}", e),
    };

    match serde_json::to_string_pretty(&doc) {
        Ok(pretty) => println!("{}", pretty),
        Err(e) => error!("Cannot render response. Err: {}", e),
    }
}
