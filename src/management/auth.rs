use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::{
    error::{Error, Result},
    http::{Clock, Connectivity, Transport},
    types::{Credentials, TokenResponse, TokenState, TokenStatus},
};

pub const SOUNDCLOUD_TOKEN_URL: &str = "https://api.soundcloud.com/oauth2/token";

/// Subtracted from `expires_in` so a token is never used right at the edge
/// of its lifetime.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(10);

/// Upper bound for the lifetime of a preset token.
pub const MAX_PRESET_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Owns the OAuth2 token pair and keeps it usable.
///
/// The manager starts out unauthenticated. [`ensure_valid`] is the only call
/// the API layer needs: it hands back the current access token when it is
/// still fresh, and otherwise tries a refresh followed by a full
/// client-credentials grant.
///
/// [`ensure_valid`]: TokenManager::ensure_valid
pub struct TokenManager {
    credentials: Credentials,
    token_url: String,
    state: Option<TokenState>,
}

impl TokenManager {
    pub fn new(credentials: Credentials) -> Self {
        TokenManager {
            credentials,
            token_url: SOUNDCLOUD_TOKEN_URL.to_string(),
            state: None,
        }
    }

    /// Starts from tokens obtained elsewhere. The values are trusted as-is.
    pub fn with_token(
        credentials: Credentials,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: u64,
        now: Instant,
    ) -> Self {
        let mut manager = Self::new(credentials);
        manager.set_token(access_token, refresh_token, expires_in, now);
        manager
    }

    /// Replaces the held tokens without contacting the token endpoint.
    ///
    /// Lifetimes above [`MAX_PRESET_LIFETIME`] are capped.
    pub fn set_token(
        &mut self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: u64,
        now: Instant,
    ) {
        let lifetime = Duration::from_secs(expires_in)
            .saturating_sub(EXPIRY_MARGIN)
            .min(MAX_PRESET_LIFETIME);
        self.state = Some(TokenState {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: now + lifetime,
        });
    }

    pub fn set_token_url(&mut self, token_url: impl Into<String>) {
        self.token_url = token_url.into();
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn status(&self, now: Instant) -> TokenStatus {
        match &self.state {
            Some(state) if !state.access_token.is_empty() && now < state.expires_at => {
                TokenStatus::Authenticated
            }
            Some(state) if !state.access_token.is_empty() => TokenStatus::Expired,
            _ => TokenStatus::Unauthenticated,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.state
            .as_ref()
            .map(|s| s.access_token.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.state
            .as_ref()
            .map(|s| s.refresh_token.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.state.as_ref().map(|s| s.expires_at)
    }

    /// Marks the access token as expired while keeping the refresh token,
    /// so the next [`ensure_valid`](TokenManager::ensure_valid) renews it.
    pub fn invalidate(&mut self, now: Instant) {
        if let Some(state) = self.state.as_mut() {
            state.expires_at = now;
        }
    }

    /// Returns a usable access token, renewing it first if needed.
    ///
    /// No network call is made while the current token is fresh. Otherwise
    /// a refresh is attempted (when a refresh token is held) and, failing
    /// that, a new client-credentials grant. The previous tokens stay in
    /// place when both attempts fail.
    pub fn ensure_valid(
        &mut self,
        transport: &dyn Transport,
        connectivity: &dyn Connectivity,
        clock: &dyn Clock,
    ) -> Result<&str> {
        let status = self.status(clock.now());
        if status == TokenStatus::Authenticated {
            return Ok(self.current_access_token());
        }
        debug!("Token status is {:?}, renewing", status);

        let mut failures = Vec::new();

        if self.refresh_token().is_some() {
            match self.refresh(transport, connectivity, clock) {
                Ok(()) => return Ok(self.current_access_token()),
                Err(e) => {
                    warn!("Token refresh failed, falling back to client credentials: {}", e);
                    failures.push(format!("refresh: {}", e));
                }
            }
        }

        match self.create_token(transport, connectivity, clock) {
            Ok(()) => Ok(self.current_access_token()),
            Err(e) => {
                warn!("Client credentials grant failed: {}", e);
                failures.push(format!("client credentials: {}", e));
                Err(Error::Authentication(failures.join("; ")))
            }
        }
    }

    /// Exchanges the held refresh token for a new token pair.
    pub fn refresh(
        &mut self,
        transport: &dyn Transport,
        connectivity: &dyn Connectivity,
        clock: &dyn Clock,
    ) -> Result<()> {
        let refresh_token = self
            .refresh_token()
            .ok_or_else(|| Error::Authentication("no refresh token held".to_string()))?
            .to_string();

        let token = self.request_token(
            transport,
            connectivity,
            &[
                ("grant_type", "refresh_token"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
            ],
        )?;

        self.install(token, clock.now())?;
        info!("Token refreshed successfully");
        Ok(())
    }

    /// Performs a full client-credentials grant.
    pub fn create_token(
        &mut self,
        transport: &dyn Transport,
        connectivity: &dyn Connectivity,
        clock: &dyn Clock,
    ) -> Result<()> {
        let token = self.request_token(
            transport,
            connectivity,
            &[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ],
        )?;

        self.install(token, clock.now())?;
        info!("Token created successfully");
        Ok(())
    }

    fn request_token(
        &self,
        transport: &dyn Transport,
        connectivity: &dyn Connectivity,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse> {
        connectivity.wait_until_ready();

        let response = transport.post_form(
            &self.token_url,
            &[("Accept", "application/json; charset=utf-8")],
            form,
        )?;

        if !response.is_ok() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }

        parse_token_response(&response.body)
    }

    fn install(&mut self, token: TokenResponse, now: Instant) -> Result<()> {
        // a server-issued lifetime shorter than the margin still yields a
        // token that is valid at the moment it is installed
        let lifetime = Duration::from_secs(token.expires_in)
            .saturating_sub(EXPIRY_MARGIN)
            .max(Duration::from_secs(1));
        let expires_at = now.checked_add(lifetime).ok_or_else(|| {
            Error::Parse(format!("expires_in out of range: {}", token.expires_in))
        })?;

        self.state = Some(TokenState {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
        });
        Ok(())
    }

    fn current_access_token(&self) -> &str {
        self.state
            .as_ref()
            .map(|s| s.access_token.as_str())
            .unwrap_or_default()
    }
}

fn parse_token_response(body: &str) -> Result<TokenResponse> {
    let token: TokenResponse = serde_json::from_str(body)?;
    if token.access_token.is_empty() || token.refresh_token.is_empty() {
        return Err(Error::Parse(
            "token response is missing access_token or refresh_token".to_string(),
        ));
    }
    Ok(token)
}
