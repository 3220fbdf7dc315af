/// 缓存操作
/// 提供缓存操作的功能实现

// 会话令牌缓存操作
pub mod token;

pub use token::{RedisSessionCache, SessionCache};
