//! Engine configuration and rate limiting for the HTTP surface.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::{
    collections::HashMap,
    net::IpAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Rate limit applied to the engine endpoints: 50 requests per 15 minutes
/// per client.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 50;
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Engine configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Allowed CORS origins (from ALLOWED_ORIGINS, comma-separated)
    pub allowed_origins: Vec<String>,
    /// Whether error details are hidden from clients (PROGEX_ENV=production)
    pub production: bool,
    /// Rate limiter instance
    pub rate_limiter: Option<RateLimiter>,
}

impl EngineConfig {
    /// Load engine configuration from environment variables.
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(Self::default_origins);

        let production = std::env::var("PROGEX_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        Self {
            allowed_origins,
            production,
            rate_limiter: Some(RateLimiter::new(RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW)),
        }
    }

    /// Create a config with no rate limiting (for local development/testing).
    pub fn disabled() -> Self {
        Self {
            allowed_origins: Self::default_origins(),
            production: false,
            rate_limiter: None,
        }
    }

    /// Create a config with a small rate limit (for testing).
    pub fn with_rate_limit(max_requests: u32) -> Self {
        Self {
            allowed_origins: Self::default_origins(),
            production: false,
            rate_limiter: Some(RateLimiter::new(max_requests, Duration::from_secs(60))),
        }
    }

    /// Create a production-mode config (error messages sanitized).
    pub fn production() -> Self {
        Self {
            allowed_origins: Self::default_origins(),
            production: true,
            rate_limiter: None,
        }
    }

    fn default_origins() -> Vec<String> {
        vec![
            "http://localhost:3000".to_string(),
            "http://localhost:5000".to_string(),
        ]
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Simple in-memory rate limiter using a sliding window per client IP.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    /// Maximum requests allowed per window
    max_requests: u32,
    /// Time window duration
    window: Duration,
    /// Request timestamps per IP
    requests: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a request from the given IP is allowed.
    /// Returns true if allowed, false if rate limited.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();

        let mut requests = match self.requests.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let entry = requests.entry(ip).or_default();

        if let Some(cutoff) = now.checked_sub(self.window) {
            entry.retain(|&t| t > cutoff);
        }

        if entry.len() < self.max_requests as usize {
            entry.push(now);
            true
        } else {
            false
        }
    }
}

/// Rate limiting middleware; over-limit clients get the JSON envelope
/// with a 429.
pub async fn rate_limit_middleware(
    State(rate_limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = extract_client_ip(&request);

    if rate_limiter.check(ip) {
        next.run(request).await
    } else {
        tracing::warn!("Rate limit exceeded for IP: {}", ip);
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "success": false,
                "error": "Too many AI requests, please try again later.",
            })),
        )
            .into_response()
    }
}

/// Extract client IP from request headers, preferring proxy headers.
fn extract_client_ip(request: &Request<Body>) -> IpAddr {
    if let Some(forwarded) = request.headers().get("X-Forwarded-For") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(ip_str) = value.split(',').next() {
                if let Ok(ip) = ip_str.trim().parse() {
                    return ip;
                }
            }
        }
    }

    if let Some(real_ip) = request.headers().get("X-Real-IP") {
        if let Ok(value) = real_ip.to_str() {
            if let Ok(ip) = value.trim().parse() {
                return ip;
            }
        }
    }

    IpAddr::from([127, 0, 0, 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limiter_allows_requests_under_limit() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.check(ip));
        }
    }

    #[test]
    fn rate_limiter_blocks_requests_over_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));

        assert!(!limiter.check(ip));
    }

    #[test]
    fn rate_limiter_tracks_ips_independently() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let ip1: IpAddr = "192.168.1.1".parse().unwrap();
        let ip2: IpAddr = "192.168.1.2".parse().unwrap();

        assert!(limiter.check(ip1));
        assert!(limiter.check(ip1));
        assert!(!limiter.check(ip1));

        assert!(limiter.check(ip2));
        assert!(limiter.check(ip2));
        assert!(!limiter.check(ip2));
    }

    #[test]
    fn disabled_config_has_no_limiter_and_default_origins() {
        let config = EngineConfig::disabled();
        assert!(config.rate_limiter.is_none());
        assert!(!config.production);
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn production_config_sanitizes_errors() {
        let config = EngineConfig::production();
        assert!(config.production);
    }
}
