//! # plaudit-proxy
//!
//! A header-rewriting passthrough for local development: the framed widget
//! fetches from a relative `/api` base, and in development this relay
//! forwards those requests to the real backend while answering CORS
//! preflights and stamping permissive CORS headers on every response.
//!
//! Not for production — the production edge terminates `/api` itself.

pub mod logger;

use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use thiserror::Error;
use tower_http::trace::TraceLayer;

/// Upper bound on a relayed request body. The widgets API only ever sees
/// small JSON payloads; anything bigger is a mistake.
const MAX_RELAY_BODY: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("could not read request body: {0}")]
    Body(String),
}

#[derive(Clone)]
pub struct ProxyState {
    target: String,
    client: reqwest::Client,
}

impl ProxyState {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// The relay router: everything under `/api/` forwards upstream with the
/// prefix stripped.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/{*path}", any(relay))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn relay(
    State(state): State<ProxyState>,
    Path(path): Path<String>,
    request: Request,
) -> Response {
    if request.method() == Method::OPTIONS {
        return preflight();
    }
    match forward(&state, &path, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, %path, "relay to upstream failed");
            let mut response =
                (StatusCode::BAD_GATEWAY, format!("relay to upstream failed: {err}"))
                    .into_response();
            apply_cors(response.headers_mut());
            response
        }
    }
}

async fn forward(state: &ProxyState, path: &str, request: Request) -> Result<Response, RelayError> {
    let upstream = upstream_url(&state.target, path, request.uri().query());
    let method = request.method().clone();
    let headers = request.headers().clone();
    let body = to_bytes(request.into_body(), MAX_RELAY_BODY)
        .await
        .map_err(|err| RelayError::Body(err.to_string()))?;

    let mut builder = state
        .client
        .request(method, &upstream)
        .header(header::ACCEPT, "application/json");
    for name in [header::CONTENT_TYPE, header::AUTHORIZATION] {
        if let Some(value) = headers.get(&name) {
            builder = builder.header(name, value.clone());
        }
    }
    if !body.is_empty() {
        builder = builder.body(body.to_vec());
    }

    let upstream_response = builder.send().await?;
    let status = upstream_response.status();
    let content_type = upstream_response.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream_response.bytes().await?;

    let mut response = Response::builder()
        .status(status)
        .body(Body::from(bytes))
        .map_err(|err| RelayError::Body(err.to_string()))?;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    apply_cors(response.headers_mut());
    Ok(response)
}

/// Answers a CORS preflight locally; preflights never reach the upstream.
fn preflight() -> Response {
    let mut response = StatusCode::OK.into_response();
    apply_cors(response.headers_mut());
    response
}

/// Permissive CORS for development: the embed iframe runs on a different
/// local origin than the API.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
}

/// Rewrites `/api/<path>?<query>` to `<target>/<path>?<query>`.
pub fn upstream_url(target: &str, path: &str, query: Option<&str>) -> String {
    let target = target.trim_end_matches('/');
    match query {
        Some(query) => format!("{target}/{path}?{query}"),
        None => format!("{target}/{path}"),
    }
}
