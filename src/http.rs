//! Capabilities the client depends on but does not implement itself.
//!
//! The [`Transport`] performs blocking HTTP round trips, [`Connectivity`]
//! decides when the network is usable, and [`Clock`] supplies monotonic time
//! for token expiry. Each has a production implementation here; tests swap
//! in scripted ones.

use std::time::{Duration, Instant};

use log::debug;
use reqwest::blocking::Client;

use crate::error::Result;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Blocking HTTP transport.
///
/// Implementations return `Err(Error::Connection)` only when no status was
/// received at all. Any HTTP status, including 4xx/5xx, is an `Ok` response.
pub trait Transport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;

    /// Sends `form` as an `application/x-www-form-urlencoded` body.
    fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<HttpResponse>;
}

/// Readiness check run before every network call.
///
/// The implementor owns the waiting policy; returning means "go ahead".
pub trait Connectivity {
    fn wait_until_ready(&self);
}

/// Connectivity for hosts where the network is assumed to be up.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn wait_until_ready(&self) {}
}

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Transport`] backed by `reqwest`'s blocking client over rustls.
///
/// Certificates are validated against the bundled web PKI roots.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn finish(response: reqwest::blocking::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        debug!("GET {}", url);
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        Self::finish(request.send()?)
    }

    fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<HttpResponse> {
        debug!("POST {}", url);
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        // sets Content-Type: application/x-www-form-urlencoded
        Self::finish(request.form(form).send()?)
    }
}
