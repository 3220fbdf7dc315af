/// 鉴权 token 缓存键前缀
pub const ACC_AUTH_TOKEN_CACHE_PREFIX: &str = "ACC_AUTH_TOKEN_CACHE_PREFIX";

/// 鉴权 token 缓存过期时间（秒），15 分钟
pub const ACC_AUTH_TOKEN_CACHE_EXPIRE: u64 = 60 * 15;

/// 刷新 token 缓存键前缀
pub const REFRESH_AUTH_TOKEN_CACHE_PREFIX: &str = "REFRESH_AUTH_TOKEN_CACHE_PREFIX";

/// 刷新 token 缓存过期时间（秒），7 天
pub const REFRESH_AUTH_TOKEN_CACHE_EXPIRE: u64 = 60 * 60 * 24 * 7;

/// 生成用户鉴权 token 缓存键
pub fn access_token_key(user_id: i64) -> String {
    format!("{}{}", ACC_AUTH_TOKEN_CACHE_PREFIX, user_id)
}

/// 生成用户刷新 token 缓存键
pub fn refresh_token_key(user_id: i64) -> String {
    format!("{}{}", REFRESH_AUTH_TOKEN_CACHE_PREFIX, user_id)
}
