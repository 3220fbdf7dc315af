/// 缓存键模块
/// 提供各种缓存键生成函数

// 令牌缓存键模块
pub mod token_keys;

// 重新导出常用的键生成函数
pub use token_keys::{
    ACC_AUTH_TOKEN_CACHE_EXPIRE, ACC_AUTH_TOKEN_CACHE_PREFIX, REFRESH_AUTH_TOKEN_CACHE_EXPIRE,
    REFRESH_AUTH_TOKEN_CACHE_PREFIX, access_token_key, refresh_token_key,
};
