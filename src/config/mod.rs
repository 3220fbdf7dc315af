use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::keys::{ACC_AUTH_TOKEN_CACHE_EXPIRE, REFRESH_AUTH_TOKEN_CACHE_EXPIRE};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub access_token_expiration_secs: u64,
    pub refresh_token_expiration_secs: u64,
    pub bcrypt_cost: u32,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    /// 文章的增删改接口是否需要携带访问令牌
    pub post_write_requires_auth: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置，`lookup` 返回 `None` 表示未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port: parse_or(lookup("SERVER_PORT"), 3000),
            api_base_uri: lookup("API_BASE_URI").unwrap_or_else(|| "/api/v1".into()),
            access_token_expiration_secs: parse_or(
                lookup("ACCESS_TOKEN_EXPIRATION"),
                ACC_AUTH_TOKEN_CACHE_EXPIRE,
            ),
            refresh_token_expiration_secs: parse_or(
                lookup("REFRESH_TOKEN_EXPIRATION"),
                REFRESH_AUTH_TOKEN_CACHE_EXPIRE,
            ),
            bcrypt_cost: parse_or(lookup("BCRYPT_COST"), bcrypt::DEFAULT_COST),
            rate_limit_window_secs: parse_or(lookup("RATE_LIMIT_WINDOW"), 60),
            rate_limit_requests: parse_or(lookup("RATE_LIMIT_REQUESTS"), 100),
            post_write_requires_auth: parse_or(lookup("POST_WRITE_REQUIRES_AUTH"), true),
        })
    }

    pub fn access_token_expiration(&self) -> Duration {
        Duration::from_secs(self.access_token_expiration_secs)
    }

    pub fn refresh_token_expiration(&self) -> Duration {
        Duration::from_secs(self.refresh_token_expiration_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

// 未设置或解析失败时使用默认值
fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
