#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    time::{Duration, Instant},
};

use sclink::{
    Error,
    http::{Clock, Connectivity, HttpResponse, Transport},
    types::Credentials,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, String>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn posts(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::Post)
            .collect()
    }

    pub fn gets(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::Get)
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }

    fn record(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> sclink::Result<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: owned(headers),
            form: owned(form),
        });

        match self.responses.borrow_mut().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(Error::Connection(message)),
            None => panic!("unexpected request to {}", url),
        }
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> sclink::Result<HttpResponse> {
        self.record(Method::Get, url, headers, &[])
    }

    fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> sclink::Result<HttpResponse> {
        self.record(Method::Post, url, headers, form)
    }
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// Counts readiness checks. Clones share the counter.
#[derive(Clone, Default)]
pub struct CountingConnectivity {
    checks: Rc<Cell<usize>>,
}

impl CountingConnectivity {
    pub fn checks(&self) -> usize {
        self.checks.get()
    }
}

impl Connectivity for CountingConnectivity {
    fn wait_until_ready(&self) {
        self.checks.set(self.checks.get() + 1);
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("client-id", "client-secret")
}

pub fn token_body(access: &str, refresh: &str, expires_in: u64) -> String {
    format!(
        r#"{{"access_token":"{}","refresh_token":"{}","expires_in":{},"scope":"","token_type":"bearer"}}"#,
        access, refresh, expires_in
    )
}
