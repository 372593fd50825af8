#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use airadio::{config::Config, server, state::AppState};
use axum::{
    Form, Json, Router,
    body::{Body, to_bytes},
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Canned upstream that records what it was sent.
#[derive(Clone)]
pub struct MockUpstream {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
    pub hits: Arc<AtomicUsize>,
    pub last_json: Arc<Mutex<Option<Value>>>,
    pub last_form: Arc<Mutex<Option<HashMap<String, String>>>>,
    pub last_auth: Arc<Mutex<Option<String>>>,
}

impl MockUpstream {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        MockUpstream {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            hits: Arc::new(AtomicUsize::new(0)),
            last_json: Arc::new(Mutex::new(None)),
            last_form: Arc::new(Mutex::new(None)),
            last_auth: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_json(&self) -> Option<Value> {
        self.last_json.lock().unwrap().clone()
    }

    pub fn last_form(&self) -> Option<HashMap<String, String>> {
        self.last_form.lock().unwrap().clone()
    }

    pub fn last_auth(&self) -> Option<String> {
        self.last_auth.lock().unwrap().clone()
    }

    async fn respond(&self, headers: &HeaderMap) -> Response {
        self.hits.fetch_add(1, Ordering::SeqCst);
        *self.last_auth.lock().unwrap() = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body.clone(),
        )
            .into_response()
    }
}

async fn completions(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    *mock.last_json.lock().unwrap() = Some(body);
    mock.respond(&headers).await
}

async fn token(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    *mock.last_form.lock().unwrap() = Some(form);
    mock.respond(&headers).await
}

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Serves `mock` as a chat-completion endpoint and returns its URL.
pub async fn spawn_completions(mock: MockUpstream) -> String {
    let base = spawn(
        Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(mock),
    )
    .await;
    format!("{}/v1/chat/completions", base)
}

/// Serves `mock` as a token endpoint and returns its URL.
pub async fn spawn_token(mock: MockUpstream) -> String {
    let base = spawn(Router::new().route("/api/token", post(token)).with_state(mock)).await;
    format!("{}/api/token", base)
}

/// A URL nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

pub fn test_config() -> Config {
    Config {
        openai_api_key: Some("test-key".to_string()),
        spotify_client_id: "client-123".to_string(),
        spotify_client_secret: "secret-456".to_string(),
        spotify_redirect_uri: "http://localhost:8888/callback".to_string(),
        upstream_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

pub fn app(config: Config) -> Router {
    server::router(AppState::new(config).unwrap())
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let res = app.oneshot(request).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn location(headers: &HeaderMap) -> String {
    headers
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string()
}

/// A chat-completion response whose single choice carries `content`.
pub fn envelope(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub fn ten_songs() -> Value {
    json!([
        { "title": "Holocene", "artist": "Bon Iver" },
        { "title": "Pink Moon", "artist": "Nick Drake" },
        { "title": "Re: Stacks", "artist": "Bon Iver" },
        { "title": "Skinny Love", "artist": "Bon Iver" },
        { "title": "Fourth of July", "artist": "Sufjan Stevens" },
        { "title": "Motion Sickness", "artist": "Phoebe Bridgers" },
        { "title": "Naked As We Came", "artist": "Iron & Wine" },
        { "title": "Lua", "artist": "Bright Eyes" },
        { "title": "The Night We Met", "artist": "Lord Huron" },
        { "title": "Cherry Wine", "artist": "Hozier" }
    ])
}
