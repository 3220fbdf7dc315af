use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use crate::error::CacheError;

/// 会话缓存：保存带过期时间的令牌标记
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// 写入标记并设置过期时间（秒）
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;

    async fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// 删除标记，键不存在时不视为错误
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// 基于 Redis 的会话缓存
#[derive(Clone)]
pub struct RedisSessionCache {
    redis: Arc<RedisClient>,
}

impl RedisSessionCache {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let found: bool = conn.exists(key).await?;
        Ok(found)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let removed: i64 = conn.del(key).await?;
        tracing::debug!(key, removed, "Deleted session cache key");
        Ok(())
    }
}
