use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;

use crate::presentation::http::{errors::AppError, state::AppState};

pub fn extract_client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("127.0.0.1")
        .to_string()
}

/// Windowed per-IP counter guarding the credential endpoints against
/// brute-force attempts. A limit of 0 disables the check.
pub async fn auth_rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let limit = state.config.rate_limit_auth_attempts;
    if limit == 0 {
        return Ok(next.run(request).await);
    }

    let ip = extract_client_ip(request.headers());
    let key = format!("auth_rate:{}", ip);

    let mut conn = state.redis.get_multiplexed_async_connection().await?;

    let count: u32 = conn.incr(&key, 1_u32).await?;
    if count == 1 {
        let _: () = conn
            .expire(&key, state.config.rate_limit_auth_window_seconds as i64)
            .await?;
    }

    if count > limit {
        tracing::warn!(ip = %ip, "auth rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}
