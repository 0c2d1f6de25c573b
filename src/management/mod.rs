mod auth;

pub use auth::EXPIRY_MARGIN;
pub use auth::MAX_PRESET_LIFETIME;
pub use auth::SOUNDCLOUD_TOKEN_URL;
pub use auth::TokenManager;
