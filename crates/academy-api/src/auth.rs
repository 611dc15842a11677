//! Admin authentication middleware.
//!
//! Admin routes are protected by a single pre-shared API key supplied as a
//! `Bearer` token. Comparison is constant-time and repeated failures from one
//! client IP are throttled.

use academy_core::AppError;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;

use crate::error::HttpAppError;

/// Upper bound on tracked client keys. The key comes from `x-forwarded-for`,
/// which clients control, so the map must not grow with attacker-chosen input.
const MAX_TRACKED_CLIENTS: usize = 10_000;

#[derive(Clone)]
pub struct AuthFailureLimiter {
    inner: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
    max_failures: u32,
    window: Duration,
}

impl AuthFailureLimiter {
    pub fn new(max_failures: u32, window_seconds: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_failures,
            window: Duration::from_secs(window_seconds),
        }
    }

    pub async fn record_failure(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        let now = Instant::now();
        if guard.len() >= MAX_TRACKED_CLIENTS && !guard.contains_key(ip) {
            guard.retain(|_, (_, reset_at)| now < *reset_at);
            if guard.len() >= MAX_TRACKED_CLIENTS {
                // Still full of live entries; drop the one closest to expiry.
                if let Some(key) = guard
                    .iter()
                    .min_by_key(|(_, (_, reset_at))| *reset_at)
                    .map(|(key, _)| key.clone())
                {
                    guard.remove(&key);
                }
            }
        }
        let (count, reset_at) = guard.entry(ip.to_string()).or_insert((0, now + self.window));
        if now >= *reset_at {
            *count = 0;
            *reset_at = now + self.window;
        }
        *count += 1;
        *count >= self.max_failures
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_blocked(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        if let Some((count, reset_at)) = guard.get(ip) {
            if Instant::now() >= *reset_at {
                guard.remove(ip);
                return false;
            }
            return *count >= self.max_failures;
        }
        false
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub admin_api_key: String,
    pub auth_failure_limiter: Option<Arc<AuthFailureLimiter>>,
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn client_ip(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            request
                .extensions()
                .get::<std::net::SocketAddr>()
                .map(|addr| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn admin_auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    if let Some(ref limiter) = auth_state.auth_failure_limiter {
        if limiter.is_blocked(&ip).await {
            return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts")
                .into_response();
        }
    }

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match token {
        Some(t) => t,
        None => {
            if let Some(ref limiter) = auth_state.auth_failure_limiter {
                limiter.record_failure(&ip).await;
            }
            return HttpAppError(AppError::Unauthorized(
                "Missing or malformed authorization header".to_string(),
            ))
            .into_response();
        }
    };

    if !secure_compare(token, &auth_state.admin_api_key) {
        if let Some(ref limiter) = auth_state.auth_failure_limiter {
            limiter.record_failure(&ip).await;
        }
        tracing::warn!(client_ip = %ip, "Rejected admin API key");
        return HttpAppError(AppError::Unauthorized("Invalid API key".to_string()))
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_compare_matches_equal_strings() {
        assert!(secure_compare("abc123", "abc123"));
        assert!(!secure_compare("abc123", "abc124"));
        assert!(!secure_compare("abc", "abc123"));
    }

    #[tokio::test]
    async fn limiter_blocks_after_max_failures() {
        let limiter = AuthFailureLimiter::new(3, 900);
        assert!(!limiter.is_blocked("10.0.0.1").await);
        limiter.record_failure("10.0.0.1").await;
        limiter.record_failure("10.0.0.1").await;
        assert!(!limiter.is_blocked("10.0.0.1").await);
        limiter.record_failure("10.0.0.1").await;
        assert!(limiter.is_blocked("10.0.0.1").await);
        // Other IPs are unaffected
        assert!(!limiter.is_blocked("10.0.0.2").await);
    }

    #[tokio::test]
    async fn limiter_map_is_bounded_under_key_spray() {
        let limiter = AuthFailureLimiter::new(10, 900);
        for i in 0..MAX_TRACKED_CLIENTS + 100 {
            limiter.record_failure(&format!("sprayed-{}", i)).await;
        }
        assert!(limiter.tracked_clients().await <= MAX_TRACKED_CLIENTS);

        // Eviction keeps the limiter functional for new clients.
        let limiter2 = AuthFailureLimiter::new(2, 900);
        limiter2.record_failure("10.0.0.9").await;
        limiter2.record_failure("10.0.0.9").await;
        assert!(limiter2.is_blocked("10.0.0.9").await);
    }
}
