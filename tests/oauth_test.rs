mod common;

use airadio::{config::Config, types::ErrorBody};
use axum::http::StatusCode;
use base64::{Engine, engine::general_purpose::STANDARD};

use common::*;

async fn relay_with(mock: MockUpstream) -> axum::Router {
    let url = spawn_token(mock).await;
    app(Config {
        spotify_token_url: url,
        ..test_config()
    })
}

#[tokio::test]
async fn test_login_redirects_to_authorize_endpoint() {
    let app = app(test_config());

    let (status, headers, _) = send(app, get("/login")).await;

    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(
        location(&headers),
        "https://accounts.spotify.com/authorize?response_type=code&client_id=client-123\
         &scope=user-read-private+user-read-email+streaming+user-modify-playback-state+user-read-playback-state\
         &redirect_uri=http%3A%2F%2Flocalhost%3A8888%2Fcallback"
    );
}

#[tokio::test]
async fn test_callback_redirects_with_token() {
    let mock = MockUpstream::new(
        StatusCode::OK,
        r#"{"access_token": "abc123", "token_type": "Bearer", "expires_in": 3600}"#,
    );
    let app = relay_with(mock.clone()).await;

    let (status, headers, _) = send(app, get("/callback?code=VALID")).await;

    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location(&headers), "http://localhost:3000?access_token=abc123");

    let form = mock.last_form().unwrap();
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["code"], "VALID");
    assert_eq!(form["redirect_uri"], "http://localhost:8888/callback");

    let expected_auth = format!("Basic {}", STANDARD.encode("client-123:secret-456"));
    assert_eq!(mock.last_auth(), Some(expected_auth));
}

#[tokio::test]
async fn test_callback_uses_configured_frontend() {
    let mock = MockUpstream::new(StatusCode::OK, r#"{"access_token": "abc123"}"#);
    let url = spawn_token(mock).await;
    let app = app(Config {
        spotify_token_url: url,
        frontend_url: "https://radio.example.com/player".to_string(),
        ..test_config()
    });

    let (_, headers, _) = send(app, get("/callback?code=VALID")).await;

    assert_eq!(
        location(&headers),
        "https://radio.example.com/player?access_token=abc123"
    );
}

#[tokio::test]
async fn test_callback_with_rejected_code_redirects_with_error() {
    let mock = MockUpstream::new(
        StatusCode::BAD_REQUEST,
        r#"{"error": "invalid_grant", "error_description": "Invalid authorization code"}"#,
    );
    let app = relay_with(mock.clone()).await;

    let (status, headers, _) = send(app.clone(), get("/callback?code=INVALID")).await;

    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(
        location(&headers),
        "http://localhost:3000?error=token_extraction_failure"
    );

    // deterministic on repeat
    let (status, again, _) = send(app, get("/callback?code=INVALID")).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location(&again), location(&headers));
    assert_eq!(mock.hits(), 2);
}

#[tokio::test]
async fn test_callback_with_non_string_token_redirects_with_error() {
    for body in [r#"{"access_token": 42}"#, r#"{"access_token": ""}"#, "not json"] {
        let mock = MockUpstream::new(StatusCode::OK, body);
        let app = relay_with(mock).await;

        let (status, headers, _) = send(app, get("/callback?code=VALID")).await;

        assert_eq!(status, StatusCode::FOUND, "body: {body}");
        assert_eq!(
            location(&headers),
            "http://localhost:3000?error=token_extraction_failure"
        );
    }
}

#[tokio::test]
async fn test_callback_with_denied_consent_skips_exchange() {
    let mock = MockUpstream::new(StatusCode::OK, r#"{"access_token": "abc123"}"#);
    let app = relay_with(mock.clone()).await;

    let (status, headers, _) = send(app, get("/callback?error=access_denied")).await;

    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location(&headers), "http://localhost:3000?error=access_denied");
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn test_callback_without_code_is_rejected() {
    let mock = MockUpstream::new(StatusCode::OK, r#"{"access_token": "abc123"}"#);
    let app = relay_with(mock.clone()).await;

    let (status, _, body) = send(app, get("/callback")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.kind, "invalid_input");
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn test_callback_with_undecodable_query_returns_error_body() {
    let mock = MockUpstream::new(StatusCode::OK, r#"{"access_token": "abc123"}"#);
    let app = relay_with(mock.clone()).await;

    let (status, headers, body) = send(app, get("/callback?code=a&code=b")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        headers.get(axum::http::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let error: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.kind, "invalid_input");
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn test_callback_with_unreachable_token_endpoint_returns_error_body() {
    let app = app(Config {
        spotify_token_url: closed_url().await,
        ..test_config()
    });

    let (status, _, body) = send(app, get("/callback?code=VALID")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.kind, "upstream_unreachable");
}
