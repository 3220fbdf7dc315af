// 缓存模块
// 包含缓存键、会话缓存抽象及其 Redis / 内存实现

pub mod keys;
pub mod memory;
pub mod operations;

// 重新导出常用类型，方便其他模块使用
pub use memory::MemorySessionCache;
pub use operations::{RedisSessionCache, SessionCache};
