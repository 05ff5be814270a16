use crate::utils::{config::RateLimitConfig, Config};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Fixed 429 body sent when the login limiter trips.
pub const LOGIN_RATE_LIMIT_MESSAGE: &str =
    "Too many login attempts, please try again after 15 minutes";

/// CORS middleware configuration
pub fn cors_layer(config: &Config) -> tower_http::cors::CorsLayer {
    use tower_http::cors::CorsLayer;

    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(
            config
                .server
                .cors_origins
                .iter()
                .map(|origin| origin.parse().unwrap())
                .collect::<Vec<_>>(),
        )
        .allow_credentials(true)
}

/// Request ID middleware
pub fn request_id_layer(
) -> tower_http::request_id::SetRequestIdLayer<tower_http::request_id::MakeRequestUuid> {
    tower_http::request_id::SetRequestIdLayer::x_request_id(tower_http::request_id::MakeRequestUuid)
}

/// Tracing middleware
pub fn trace_layer() -> tower_http::trace::TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
> {
    tower_http::trace::TraceLayer::new_for_http()
        .make_span_with(tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO))
}

/// Connectivity check handler
pub async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Backend is connected!" }))
}

struct WindowState {
    started_at: Instant,
    count: u32,
}

/// Fixed-window login rate limiter keyed by originating address.
#[derive(Clone)]
pub struct LoginRateLimiter {
    max_attempts: u32,
    window: Duration,
    hits: Arc<Mutex<HashMap<String, WindowState>>>,
}

struct RateDecision {
    allowed: bool,
    remaining: u32,
    reset_secs: u64,
}

impl LoginRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_attempts: config.login_max_attempts,
            window: Duration::from_secs(config.login_window_secs),
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn register_hit(&self, key: &str) -> RateDecision {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);

        let entry = hits.entry(key.to_string()).or_insert(WindowState {
            started_at: now,
            count: 0,
        });
        if now.duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }
        entry.count += 1;

        let reset_secs = self
            .window
            .saturating_sub(now.duration_since(entry.started_at))
            .as_secs()
            .max(1);

        RateDecision {
            allowed: entry.count <= self.max_attempts,
            remaining: self.max_attempts.saturating_sub(entry.count),
            reset_secs,
        }
    }
}

/// Login rate limiting middleware.
///
/// Counts every request against the caller's window, including rejected
/// ones, and answers 429 with a fixed body once the limit is exceeded.
/// Draft `RateLimit-*` headers are set on every response.
pub async fn login_rate_limit(
    State(limiter): State<LoginRateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_ip(&request);
    let decision = limiter.register_hit(&key);

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        let mut rejected = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({ "error": LOGIN_RATE_LIMIT_MESSAGE })),
        )
            .into_response();
        rejected
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(decision.reset_secs));
        rejected
    };

    let headers = response.headers_mut();
    headers.insert("ratelimit-limit", HeaderValue::from(limiter.max_attempts));
    headers.insert("ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert("ratelimit-reset", HeaderValue::from(decision.reset_secs));

    response
}

/// Best-effort client address: forwarded headers first, socket address last.
fn client_ip(request: &Request) -> String {
    let headers = request.headers();

    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
