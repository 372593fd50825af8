use std::{net::SocketAddr, time::Instant};

use axum::{
    Extension, Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{Res, api, info, state::AppState, success};

/// Assembles the relay's router around `state`.
///
/// Every route, the fallback included, goes through the CORS and request
/// logging middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/api/generate-tracks", post(api::generate_tracks))
        .fallback(not_found)
        .layer(Extension(state))
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(log_request))
}

/// Binds `0.0.0.0:<port>` and serves until Ctrl-C.
pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Running on port {}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    success!("Server stopped");
    Ok(())
}

/// Allows every origin, header and method. Preflight requests are answered
/// here with 204 and never reach a handler.
async fn cors(req: Request, next: Next) -> Response {
    let mut res = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = res.headers_mut();
    let any = HeaderValue::from_static("*");
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, any);

    res
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let res = next.run(req).await;

    info!(
        "{} {} {} {:?}",
        method,
        path,
        res.status().as_u16(),
        start.elapsed()
    );
    res
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn shutdown_signal() {
    // without a signal handler the server simply runs until killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
