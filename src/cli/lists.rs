use serde_json::Value;
use tabled::Table;

use crate::{
    error, info,
    types::{PlaylistTableRow, TrackTableRow, UserTableRow, collection_items},
    warning,
};

use super::{connect, spinner};

#[derive(Debug, Clone, Copy)]
pub enum SearchKind {
    Tracks,
    Users,
    Playlists { show_tracks: bool },
}

#[derive(Debug, Clone, Copy)]
pub enum UserListKind {
    Uploads,
    Likes,
}

pub fn search(kind: SearchKind, query: &str, limit: u32) {
    let mut client = connect();

    let pb = spinner("Searching...");
    let result = match kind {
        SearchKind::Tracks => client.search_tracks(query, limit),
        SearchKind::Users => client.search_users(query, limit),
        SearchKind::Playlists { show_tracks } => client.search_playlists(query, limit, show_tracks),
    };
    pb.finish_and_clear();

    let page = match result {
        Ok(page) => page,
        Err(e) => error!("Search failed. Err: {}", e),
    };

    match kind {
        SearchKind::Tracks => print_tracks(&page),
        SearchKind::Users => print_rows::<UserTableRow>(&page),
        SearchKind::Playlists { .. } => print_rows::<PlaylistTableRow>(&page),
    }

    if page.get("next_href").and_then(Value::as_str).is_some() {
        info!("More results available, raise --limit to see them");
    }
}

pub fn user_list(kind: UserListKind, user_urn: &str, limit: u32) {
    let mut client = connect();

    let pb = spinner("Fetching tracks...");
    let result = match kind {
        UserListKind::Uploads => client.user_tracks(user_urn, limit),
        UserListKind::Likes => client.user_liked_tracks(user_urn, limit),
    };
    pb.finish_and_clear();

    match result {
        Ok(page) => print_tracks(&page),
        Err(e) => error!("Cannot fetch tracks for {}. Err: {}", user_urn, e),
    }
}

fn print_tracks(page: &Value) {
    print_rows::<TrackTableRow>(page);
}

fn print_rows<'a, R>(page: &'a Value)
where
    R: tabled::Tabled + From<&'a Value>,
{
    let items = collection_items(page);
    if items.is_empty() {
        warning!("No results");
        return;
    }

    let rows: Vec<R> = items.iter().map(R::from).collect();
    println!("{}", Table::new(rows));
}
