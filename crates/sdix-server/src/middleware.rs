use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// An incoming `x-request-id` header is reused, otherwise a `UUIDv4` is
/// generated. The ID is stored as a [`RequestId`] extension and echoed on
/// the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

#[derive(Debug, Clone, Copy)]
struct ClientWindow {
    started_at: Instant,
    count: usize,
}

#[derive(Debug)]
struct ClientWindows {
    clients: HashMap<String, ClientWindow>,
    last_pruned: Instant,
}

/// Fixed-window limiter on the intent routes, one window per client.
///
/// Windows older than the window length are dropped at most once per window
/// length, so the map only holds clients seen recently.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    windows: Arc<Mutex<ClientWindows>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(ClientWindows {
                clients: HashMap::new(),
                last_pruned: Instant::now(),
            })),
        }
    }

    /// Count one request from `client` at `now`.
    ///
    /// Returns the time until the client's window resets when it is over
    /// the limit.
    async fn admit(&self, client: &str, now: Instant) -> Result<(), Duration> {
        let mut guard = self.windows.lock().await;

        if now.duration_since(guard.last_pruned) >= self.window {
            let window = self.window;
            guard
                .clients
                .retain(|_, w| now.duration_since(w.started_at) < window);
            guard.last_pruned = now;
        }

        let entry = guard
            .clients
            .entry(client.to_string())
            .or_insert(ClientWindow {
                started_at: now,
                count: 0,
            });

        let elapsed = now.duration_since(entry.started_at);
        if elapsed >= self.window {
            *entry = ClientWindow {
                started_at: now,
                count: 0,
            };
        }

        if entry.count >= self.max_requests {
            return Err(self.window.saturating_sub(elapsed));
        }

        entry.count += 1;
        Ok(())
    }
}

/// Identify the caller: first `x-forwarded-for` hop, then the peer address.
fn client_key(req: &Request) -> String {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty());

    if let Some(hop) = forwarded {
        return hop.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}

/// Middleware enforcing the per-client request limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_key(&req);

    if let Err(retry_after) = rate_limit.admit(&client, Instant::now()).await {
        tracing::warn!(client = %client, "intent rate limit exceeded");
        let req_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_default();
        let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);

        let mut res =
            ApiError::new(req_id, "rate_limited", "rate limit exceeded").into_response();
        res.headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        return res;
    }

    next.run(req).await
}
