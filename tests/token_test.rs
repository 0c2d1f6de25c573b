mod support;

use std::time::Duration;

use sclink::{
    Error,
    http::Clock,
    management::{EXPIRY_MARGIN, MAX_PRESET_LIFETIME, SOUNDCLOUD_TOKEN_URL, TokenManager},
    types::TokenStatus,
};
use support::{CountingConnectivity, FakeTransport, ManualClock, credentials, token_body};

#[test]
fn test_new_manager_is_unauthenticated() {
    let clock = ManualClock::new();
    let manager = TokenManager::new(credentials());

    assert_eq!(manager.status(clock.now()), TokenStatus::Unauthenticated);
    assert!(manager.access_token().is_none());
    assert!(manager.refresh_token().is_none());
    assert_eq!(manager.token_url(), SOUNDCLOUD_TOKEN_URL);
}

#[test]
fn test_fresh_token_needs_no_network() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new();
    let mut manager = TokenManager::with_token(credentials(), "access", "refresh", 3600, clock.now());

    clock.advance(Duration::from_secs(3000));
    let token = manager.ensure_valid(&transport, &net, &clock).unwrap();

    assert_eq!(token, "access");
    assert!(transport.requests().is_empty());
    assert_eq!(net.checks(), 0);
}

#[test]
fn test_create_token_sends_client_credentials() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new().respond(200, &token_body("a1", "r1", 3600));
    let mut manager = TokenManager::new(credentials());

    manager.create_token(&transport, &net, &clock).unwrap();

    let posts = transport.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].url, SOUNDCLOUD_TOKEN_URL);
    assert_eq!(posts[0].form_value("grant_type"), Some("client_credentials"));
    assert_eq!(posts[0].form_value("client_id"), Some("client-id"));
    assert_eq!(posts[0].form_value("client_secret"), Some("client-secret"));
    assert_eq!(posts[0].form_value("refresh_token"), None);
    assert_eq!(net.checks(), 1);

    assert_eq!(manager.access_token(), Some("a1"));
    assert_eq!(manager.refresh_token(), Some("r1"));
    assert_eq!(
        manager.expires_at(),
        Some(clock.now() + Duration::from_secs(3600) - EXPIRY_MARGIN)
    );
    assert_eq!(manager.status(clock.now()), TokenStatus::Authenticated);
}

#[test]
fn test_refresh_sends_refresh_token() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new().respond(200, &token_body("a2", "r2", 3600));
    let mut manager = TokenManager::with_token(credentials(), "a1", "r1", 3600, clock.now());

    manager.refresh(&transport, &net, &clock).unwrap();

    let posts = transport.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].form_value("grant_type"), Some("refresh_token"));
    assert_eq!(posts[0].form_value("refresh_token"), Some("r1"));
    assert_eq!(posts[0].form_value("client_id"), Some("client-id"));
    assert_eq!(posts[0].form_value("client_secret"), Some("client-secret"));
    assert_eq!(manager.access_token(), Some("a2"));
    assert_eq!(manager.refresh_token(), Some("r2"));
}

#[test]
fn test_successful_grant_leaves_future_expiry() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();

    for expires_in in [0, 1, 10, 11, 3600] {
        let transport = FakeTransport::new().respond(200, &token_body("a", "r", expires_in));
        let mut manager = TokenManager::new(credentials());
        manager.create_token(&transport, &net, &clock).unwrap();

        assert!(manager.expires_at().unwrap() > clock.now(), "expires_in = {}", expires_in);
        assert!(!manager.access_token().unwrap().is_empty());
        assert!(!manager.refresh_token().unwrap().is_empty());
    }
}

#[test]
fn test_expired_token_is_refreshed_once() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new().respond(200, &token_body("a2", "r2", 3600));
    let mut manager = TokenManager::with_token(credentials(), "a1", "r1", 60, clock.now());

    clock.advance(Duration::from_secs(50));
    assert_eq!(manager.status(clock.now()), TokenStatus::Expired);

    let token = manager.ensure_valid(&transport, &net, &clock).unwrap().to_string();

    assert_eq!(token, "a2");
    assert_eq!(transport.posts().len(), 1);
    assert_eq!(transport.posts()[0].form_value("grant_type"), Some("refresh_token"));
}

#[test]
fn test_rejected_refresh_falls_back_to_client_credentials() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new()
        .respond(401, r#"{"error":"invalid_grant"}"#)
        .respond(200, &token_body("a3", "r3", 3600));
    let mut manager = TokenManager::with_token(credentials(), "a1", "r1", 0, clock.now());

    let token = manager.ensure_valid(&transport, &net, &clock).unwrap().to_string();

    assert_eq!(token, "a3");
    let posts = transport.posts();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].form_value("grant_type"), Some("refresh_token"));
    assert_eq!(posts[1].form_value("grant_type"), Some("client_credentials"));
    assert_eq!(net.checks(), 2);
}

#[test]
fn test_malformed_refresh_body_falls_back() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new()
        .respond(200, "<html>gateway</html>")
        .respond(200, &token_body("a3", "r3", 3600));
    let mut manager = TokenManager::with_token(credentials(), "a1", "r1", 0, clock.now());

    assert_eq!(manager.ensure_valid(&transport, &net, &clock).unwrap(), "a3");
    assert_eq!(transport.posts().len(), 2);
}

#[test]
fn test_refresh_connection_error_falls_back() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new()
        .fail("connection reset")
        .respond(200, &token_body("a3", "r3", 3600));
    let mut manager = TokenManager::with_token(credentials(), "a1", "r1", 0, clock.now());

    assert_eq!(manager.ensure_valid(&transport, &net, &clock).unwrap(), "a3");
}

#[test]
fn test_without_refresh_token_goes_straight_to_create() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new().respond(200, &token_body("a1", "r1", 3600));
    let mut manager = TokenManager::new(credentials());

    assert_eq!(manager.ensure_valid(&transport, &net, &clock).unwrap(), "a1");

    let posts = transport.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].form_value("grant_type"), Some("client_credentials"));
}

#[test]
fn test_double_failure_reports_authentication_and_keeps_tokens() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new()
        .respond(401, "")
        .respond(500, "oops");
    let mut manager = TokenManager::with_token(credentials(), "a1", "r1", 0, clock.now());
    let expires_before = manager.expires_at();

    let err = manager.ensure_valid(&transport, &net, &clock).unwrap_err();

    assert!(matches!(err, Error::Authentication(_)));
    assert_eq!(manager.access_token(), Some("a1"));
    assert_eq!(manager.refresh_token(), Some("r1"));
    assert_eq!(manager.expires_at(), expires_before);
    assert_eq!(manager.status(clock.now()), TokenStatus::Expired);
}

#[test]
fn test_failed_create_reports_status() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new().respond(401, r#"{"error":"invalid_client"}"#);
    let mut manager = TokenManager::new(credentials());

    let err = manager.create_token(&transport, &net, &clock).unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(manager.status(clock.now()), TokenStatus::Unauthenticated);
}

#[test]
fn test_response_missing_refresh_token_is_rejected() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport =
        FakeTransport::new().respond(200, r#"{"access_token":"a","expires_in":3600}"#);
    let mut manager = TokenManager::new(credentials());

    let err = manager.create_token(&transport, &net, &clock).unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(manager.access_token().is_none());
}

#[test]
fn test_invalidate_forces_renewal() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new().respond(200, &token_body("a2", "r2", 3600));
    let mut manager = TokenManager::with_token(credentials(), "a1", "r1", 3600, clock.now());

    manager.invalidate(clock.now());
    assert_eq!(manager.status(clock.now()), TokenStatus::Expired);
    assert_eq!(manager.refresh_token(), Some("r1"));

    assert_eq!(manager.ensure_valid(&transport, &net, &clock).unwrap(), "a2");
}

#[test]
fn test_custom_token_url() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new().respond(200, &token_body("a", "r", 3600));
    let mut manager = TokenManager::new(credentials());
    manager.set_token_url("http://localhost:9000/oauth2/token");

    manager.create_token(&transport, &net, &clock).unwrap();

    assert_eq!(transport.posts()[0].url, "http://localhost:9000/oauth2/token");
}

#[test]
fn test_out_of_range_expiry_is_rejected() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new().respond(200, &token_body("a", "r", u64::MAX));
    let mut manager = TokenManager::new(credentials());

    let err = manager.create_token(&transport, &net, &clock).unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(manager.status(clock.now()), TokenStatus::Unauthenticated);
}

#[test]
fn test_out_of_range_refresh_falls_back_to_create() {
    let clock = ManualClock::new();
    let net = CountingConnectivity::default();
    let transport = FakeTransport::new()
        .respond(200, &token_body("a2", "r2", u64::MAX))
        .respond(200, &token_body("a3", "r3", 3600));
    let mut manager = TokenManager::with_token(credentials(), "a1", "r1", 0, clock.now());

    let token = manager.ensure_valid(&transport, &net, &clock).unwrap();

    assert_eq!(token, "a3");
    assert_eq!(transport.posts().len(), 2);
    assert_eq!(manager.refresh_token(), Some("r3"));
}

#[test]
fn test_preset_lifetime_is_capped() {
    let clock = ManualClock::new();
    let manager = TokenManager::with_token(credentials(), "a", "r", u64::MAX, clock.now());

    assert_eq!(manager.expires_at(), Some(clock.now() + MAX_PRESET_LIFETIME));
    assert_eq!(manager.status(clock.now()), TokenStatus::Authenticated);
}
