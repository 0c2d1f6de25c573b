//! # CLI Module
//!
//! Command implementations behind the `sclink` binary. Each command builds a
//! client from the environment, runs exactly one library operation and
//! renders the result, either as a table (collections) or as pretty-printed
//! JSON (single resources).
//!
//! ## Usage
//!
//! ```bash
//! sclink tracks "daft punk" --limit 3
//! sclink playlists "lofi" --show-tracks
//! sclink streams soundcloud:tracks:123
//! sclink user-likes soundcloud:users:42 --limit 10
//! sclink get "https://api.soundcloud.com/me"
//! ```
//!
//! Errors are printed with the `error!` macro and end the process with exit
//! code 1. Library diagnostics go through `log` and show up with
//! `RUST_LOG=sclink=debug`.

mod lists;
mod resources;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{SoundCloudClient, config::Config, encoding, error, success};

pub use lists::{SearchKind, UserListKind, search, user_list};
pub use resources::{Resource, show};

pub fn encode(text: &str) {
    println!("{}", encoding::encode(text));
}

/// Builds a client from the environment and authenticates it unless a
/// preset token was configured.
fn connect() -> SoundCloudClient {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}\nSet it in the environment or in {}", e, crate::config::env_path().display()),
    };

    let mut client = match SoundCloudClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => error!("Cannot create client. Err: {}", e),
    };

    if config.token.is_none() {
        let pb = spinner("Authenticating...");
        let result = client.begin();
        pb.finish_and_clear();
        match result {
            Ok(()) => success!("Authenticated with client credentials"),
            Err(e) => error!("{}", e),
        }
    }

    client
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
