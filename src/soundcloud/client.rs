use log::{debug, warn};
use serde_json::Value;
use url::Url;

use crate::{
    config::Config,
    encoding,
    error::{Error, Result},
    http::{AlwaysOnline, Clock, Connectivity, ReqwestTransport, SystemClock, Transport},
    management::TokenManager,
    request::{QuerySpec, RequestBuilder},
    types::{Credentials, TokenStatus},
};

/// Blocking SoundCloud API client.
///
/// Every operation takes `&mut self`: a call may renew the token before the
/// request goes out, and one instance serves one caller at a time.
///
/// # Example
///
/// ```no_run
/// use sclink::{SoundCloudClient, types::Credentials};
///
/// let mut client = SoundCloudClient::new(Credentials::new("id", "secret"))?;
/// client.begin()?;
/// let tracks = client.search_tracks("daft punk", 3)?;
/// # Ok::<(), sclink::Error>(())
/// ```
pub struct SoundCloudClient<T: Transport = ReqwestTransport> {
    transport: T,
    tokens: TokenManager,
    builder: RequestBuilder,
    clock: Box<dyn Clock>,
    connectivity: Box<dyn Connectivity>,
}

impl SoundCloudClient<ReqwestTransport> {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self::with_transport(credentials, ReqwestTransport::new()?))
    }

    /// Builds a client from environment configuration. When the config
    /// carries a preset token it is installed; otherwise the caller still
    /// has to [`begin`](SoundCloudClient::begin).
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(config.credentials.clone())?
            .with_api_base(&config.api_url)
            .with_token_url(&config.token_url);

        if let Some(token) = &config.token {
            client.begin_with_token(&token.access_token, &token.refresh_token, token.expires_in);
        }
        Ok(client)
    }
}

impl<T: Transport> SoundCloudClient<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        SoundCloudClient {
            transport,
            tokens: TokenManager::new(credentials),
            builder: RequestBuilder::default(),
            clock: Box::new(SystemClock),
            connectivity: Box::new(AlwaysOnline),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_connectivity(mut self, connectivity: impl Connectivity + 'static) -> Self {
        self.connectivity = Box::new(connectivity);
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.builder = RequestBuilder::new(api_base, self.builder.max_len());
        self
    }

    pub fn with_max_url_len(mut self, max_len: usize) -> Self {
        self.builder = RequestBuilder::new(self.builder.api_base(), max_len);
        self
    }

    pub fn with_token_url(mut self, token_url: &str) -> Self {
        self.tokens.set_token_url(token_url);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn token_status(&self) -> TokenStatus {
        self.tokens.status(self.clock.now())
    }

    /// Authenticates with a fresh client-credentials grant.
    pub fn begin(&mut self) -> Result<()> {
        self.tokens
            .create_token(
                &self.transport,
                self.connectivity.as_ref(),
                self.clock.as_ref(),
            )
            .map_err(|e| Error::Authentication(e.to_string()))
    }

    /// Skips authentication and uses tokens obtained elsewhere.
    pub fn begin_with_token(&mut self, access_token: &str, refresh_token: &str, expires_in: u64) {
        let now = self.clock.now();
        self.tokens
            .set_token(access_token, refresh_token, expires_in, now);
    }

    pub fn url_encode(&self, input: &str) -> String {
        encoding::encode(input)
    }

    /// Fetches a complete caller-supplied URL.
    ///
    /// The URL is sent exactly as given: it is neither percent-encoded nor
    /// used as a template. It must still be an absolute http(s) URL within
    /// the length limit.
    pub fn custom_get(&mut self, url: &str) -> Result<Value> {
        self.builder.check_len(url)?;

        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                url,
                parsed.scheme()
            )));
        }

        self.get_json(url)
    }

    /// Follows `next_href` of a linked-partitioning collection.
    ///
    /// Returns `Ok(None)` on the last page.
    pub fn next_page(&mut self, page: &Value) -> Result<Option<Value>> {
        let next = match page.get("next_href").and_then(Value::as_str) {
            Some(href) if !href.is_empty() => href.to_string(),
            _ => return Ok(None),
        };

        self.custom_get(&next).map(Some)
    }

    pub(crate) fn fetch(&mut self, spec: QuerySpec) -> Result<Value> {
        let url = self.builder.build(&spec)?;
        self.get_json(&url)
    }

    fn get_json(&mut self, url: &str) -> Result<Value> {
        let token = self.tokens.ensure_valid(
            &self.transport,
            self.connectivity.as_ref(),
            self.clock.as_ref(),
        )?;
        let authorization = format!("Bearer {}", token);

        self.connectivity.wait_until_ready();
        debug!("Requesting {}", url);
        let response = self.transport.get(
            url,
            &[
                ("Authorization", authorization.as_str()),
                ("Accept", "application/json; charset=utf-8"),
            ],
        )?;

        if !response.is_ok() {
            warn!("Request to {} failed with HTTP {}", url, response.status);
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| Error::Parse(format!("response from {}: {}", url, e)))
    }
}
