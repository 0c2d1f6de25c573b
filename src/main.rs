use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sclink::{
    cli::{self, Resource, SearchKind, UserListKind},
    config, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search tracks
    Tracks(SearchOptions),

    /// Search users
    Users(SearchOptions),

    /// Search playlists
    Playlists(PlaylistSearchOptions),

    /// Show a single track
    Track(UrnOption),

    /// Show the stream URLs of a track
    Streams(UrnOption),

    /// Show a single playlist
    Playlist(PlaylistOptions),

    /// List tracks uploaded by a user
    UserTracks(UserListOptions),

    /// List tracks liked by a user
    UserLikes(UserListOptions),

    /// Fetch an arbitrary API URL
    Get(UrlOption),

    /// Percent-encode a string the way queries are encoded
    Encode(EncodeOption),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Free-text query
    query: String,

    /// Maximum number of results (0 = API default)
    #[clap(long, default_value_t = 10)]
    limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistSearchOptions {
    #[clap(flatten)]
    search: SearchOptions,

    /// Include the track list of every playlist
    #[clap(long)]
    show_tracks: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct UrnOption {
    /// Resource URN (e.g. soundcloud:tracks:123) or numeric id
    urn: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Playlist URN or numeric id
    urn: String,

    /// Leave out the track list
    #[clap(long)]
    no_tracks: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct UserListOptions {
    /// User URN or numeric id
    urn: String,

    /// Maximum number of tracks (0 = API default)
    #[clap(long, default_value_t = 0)]
    limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct UrlOption {
    /// Absolute URL, sent as-is
    url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EncodeOption {
    text: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn main() {
    env_logger::init();

    if let Err(e) = config::load_env() {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Tracks(opt) => cli::search(SearchKind::Tracks, &opt.query, opt.limit),
        Command::Users(opt) => cli::search(SearchKind::Users, &opt.query, opt.limit),
        Command::Playlists(opt) => cli::search(
            SearchKind::Playlists {
                show_tracks: opt.show_tracks,
            },
            &opt.search.query,
            opt.search.limit,
        ),
        Command::Track(opt) => cli::show(Resource::Track(opt.urn)),
        Command::Streams(opt) => cli::show(Resource::Streams(opt.urn)),
        Command::Playlist(opt) => cli::show(Resource::Playlist {
            urn: opt.urn,
            show_tracks: !opt.no_tracks,
        }),
        Command::UserTracks(opt) => cli::user_list(UserListKind::Uploads, &opt.urn, opt.limit),
        Command::UserLikes(opt) => cli::user_list(UserListKind::Likes, &opt.urn, opt.limit),
        Command::Get(opt) => cli::show(Resource::Url(opt.url)),
        Command::Encode(opt) => cli::encode(&opt.text),
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
