use std::{fmt, time::Instant};

use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Tokens currently held by the client and the instant the access token
/// stops being usable (already reduced by the safety margin).
#[derive(Clone, PartialEq, Eq)]
pub struct TokenState {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Instant,
}

impl fmt::Debug for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenState")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &!self.refresh_token.is_empty())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Unauthenticated,
    Authenticated,
    Expired,
}

/// Reply from `POST /oauth2/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub urn: String,
    pub title: String,
    pub user: String,
    pub duration: String,
}

impl From<&Value> for TrackTableRow {
    fn from(track: &Value) -> Self {
        let millis = track["duration"].as_u64().unwrap_or(0);
        TrackTableRow {
            urn: text(track, "urn"),
            title: text(track, "title"),
            user: track["user"]["username"].as_str().unwrap_or_default().to_string(),
            duration: format!("{}:{:02}", millis / 60_000, (millis / 1000) % 60),
        }
    }
}

#[derive(Tabled)]
pub struct UserTableRow {
    pub urn: String,
    pub username: String,
    pub followers: u64,
    pub tracks: u64,
}

impl From<&Value> for UserTableRow {
    fn from(user: &Value) -> Self {
        UserTableRow {
            urn: text(user, "urn"),
            username: text(user, "username"),
            followers: user["followers_count"].as_u64().unwrap_or(0),
            tracks: user["track_count"].as_u64().unwrap_or(0),
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub urn: String,
    pub title: String,
    pub user: String,
    pub tracks: u64,
}

impl From<&Value> for PlaylistTableRow {
    fn from(playlist: &Value) -> Self {
        PlaylistTableRow {
            urn: text(playlist, "urn"),
            title: text(playlist, "title"),
            user: playlist["user"]["username"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            tracks: playlist["track_count"].as_u64().unwrap_or(0),
        }
    }
}

/// Items of a collection response. Linked-partitioning replies wrap them in
/// `{"collection": [...]}`; plain list endpoints return a bare array.
pub fn collection_items(doc: &Value) -> &[Value] {
    doc.get("collection")
        .and_then(Value::as_array)
        .or_else(|| doc.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text(value: &Value, key: &str) -> String {
    match &value[key] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
