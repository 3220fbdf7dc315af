use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use redis::AsyncCommands;

use crate::{config::Config, error::AppError};

/// 基于 Redis 的固定窗口限流器，按客户端 IP 计数
#[derive(Clone)]
pub struct RateLimiter {
    redis: Arc<redis::Client>,
    config: Arc<Config>,
}

impl RateLimiter {
    pub fn new(redis: Arc<redis::Client>, config: Arc<Config>) -> Self {
        Self { redis, config }
    }

    pub async fn check_rate_limit(&self, req: Request<Body>, next: Next) -> Response {
        let key = format!("rate_limit:{}", client_ip(&req));

        match self.hit(&key).await {
            Ok(count) if count > i64::from(self.config.rate_limit_requests) => {
                tracing::warn!(key = %key, count, "Rate limit exceeded");
                AppError::RateLimited(self.config.rate_limit_window().as_secs()).into_response()
            }
            Ok(_) => next.run(req).await,
            Err(e) => {
                // Redis 不可用时放行
                tracing::error!(error = %e, "Rate limiter unavailable");
                next.run(req).await
            }
        }
    }

    // 使用 Redis 的 INCR 和 EXPIRE 命令实现计数器
    async fn hit(&self, key: &str) -> Result<i64, redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let count: i64 = conn.incr(key, 1).await?;

        if count == 1 {
            // 窗口内第一次请求，设置过期时间
            let _: () = conn
                .expire(key, self.config.rate_limit_window().as_secs() as i64)
                .await?;
        }

        Ok(count)
    }
}

/// 依次从 `x-real-ip`、`x-forwarded-for`、连接信息中取客户端 IP
pub fn client_ip<B>(req: &Request<B>) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    header("x-real-ip")
        .or_else(|| {
            header("x-forwarded-for")
                .and_then(|s| s.split(',').map(str::trim).find(|ip| !ip.is_empty()))
        })
        .map(str::to_string)
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    limiter.check_rate_limit(req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_ip_prefers_headers_over_socket() {
        let mut req = Request::builder()
            .header("x-forwarded-for", " , 10.0.0.2, 10.0.0.3")
            .body(())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
        assert_eq!(client_ip(&req), "10.0.0.2");

        req.headers_mut().insert("x-real-ip", "10.0.0.9".parse().unwrap());
        assert_eq!(client_ip(&req), "10.0.0.9");
    }

    #[test]
    fn client_ip_falls_back_to_socket_then_unknown() {
        let mut req = Request::builder().body(()).unwrap();
        assert_eq!(client_ip(&req), "unknown");

        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 4000))));
        assert_eq!(client_ip(&req), "192.168.1.7");
    }
}
