//! Configuration management for sclink.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! - Linux: `~/.local/share/sclink/.env`
//! - macOS: `~/Library/Application Support/sclink/.env`
//! - Windows: `%LOCALAPPDATA%/sclink/.env`
//!
//! Variables already present in the process environment take precedence
//! over the file.

use std::{env, path::PathBuf};

use crate::{
    error::{Error, Result},
    management::SOUNDCLOUD_TOKEN_URL,
    request::SOUNDCLOUD_API_URL,
    types::Credentials,
};

/// Loads environment variables from `<data_local_dir>/sclink/.env`.
///
/// A missing file is fine (everything may already be exported); a file that
/// exists but cannot be parsed is reported.
pub fn load_env() -> Result<()> {
    let path = env_path();
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Config(format!("cannot load {}: {}", path.display(), e)))
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sclink/.env");
    path
}

/// Returns the SoundCloud application client ID (`SOUNDCLOUD_CLIENT_ID`).
pub fn soundcloud_client_id() -> Result<String> {
    required("SOUNDCLOUD_CLIENT_ID")
}

/// Returns the SoundCloud application client secret
/// (`SOUNDCLOUD_CLIENT_SECRET`). Never log this value.
pub fn soundcloud_client_secret() -> Result<String> {
    required("SOUNDCLOUD_CLIENT_SECRET")
}

/// Base URL of the resource endpoints (`SOUNDCLOUD_API_URL`).
pub fn soundcloud_api_url() -> String {
    env::var("SOUNDCLOUD_API_URL").unwrap_or_else(|_| SOUNDCLOUD_API_URL.to_string())
}

/// Token endpoint (`SOUNDCLOUD_TOKEN_URL`).
pub fn soundcloud_token_url() -> String {
    env::var("SOUNDCLOUD_TOKEN_URL").unwrap_or_else(|_| SOUNDCLOUD_TOKEN_URL.to_string())
}

/// A token pair handed in from outside, used instead of authenticating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

/// Reads `SOUNDCLOUD_ACCESS_TOKEN`, `SOUNDCLOUD_REFRESH_TOKEN` and
/// `SOUNDCLOUD_EXPIRES_IN`. Returns `None` unless an access token is set.
pub fn soundcloud_preset_token() -> Result<Option<PresetToken>> {
    let access_token = match env::var("SOUNDCLOUD_ACCESS_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => return Ok(None),
    };

    let expires_in = match env::var("SOUNDCLOUD_EXPIRES_IN") {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
            Error::Config(format!("SOUNDCLOUD_EXPIRES_IN must be seconds: {}", e))
        })?,
        // treat as already expired so the first call refreshes it
        Err(_) => 0,
    };

    Ok(Some(PresetToken {
        access_token,
        refresh_token: env::var("SOUNDCLOUD_REFRESH_TOKEN").unwrap_or_default(),
        expires_in,
    }))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub api_url: String,
    pub token_url: String,
    pub token: Option<PresetToken>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            credentials: Credentials::new(soundcloud_client_id()?, soundcloud_client_secret()?),
            api_url: soundcloud_api_url(),
            token_url: soundcloud_token_url(),
            token: soundcloud_preset_token()?,
        })
    }
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", key))),
    }
}
