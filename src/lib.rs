//! SoundCloud API Client Library
//!
//! A small blocking client for the SoundCloud HTTP API, sized for constrained
//! hosts. It authenticates with OAuth2 client credentials, keeps the token
//! pair fresh, and issues read-only queries that come back as parsed JSON.
//!
//! # Modules
//!
//! - `cli` - Command-line front end used by the `sclink` binary
//! - `config` - Configuration from environment variables and `.env`
//! - `encoding` - Percent-encoding for query values and path segments
//! - `error` - Error type shared by every operation
//! - `http` - Transport, connectivity and clock capabilities
//! - `management` - OAuth2 token lifecycle
//! - `request` - Bounded URL construction
//! - `soundcloud` - The API client and its operations
//! - `types` - Data structures shared across modules
//!
//! # Example
//!
//! ```no_run
//! use sclink::{SoundCloudClient, config::Config};
//!
//! fn main() -> sclink::Result<()> {
//!     sclink::config::load_env()?;
//!     let mut client = SoundCloudClient::from_config(&Config::from_env()?)?;
//!     client.begin()?;
//!     let page = client.search_tracks("daft punk", 3)?;
//!     println!("{}", page);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod http;
pub mod management;
pub mod request;
pub mod soundcloud;
pub mod types;

pub use error::{Error, Result};
pub use soundcloud::SoundCloudClient;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching tracks for '{}'", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary uses this; library code returns [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
