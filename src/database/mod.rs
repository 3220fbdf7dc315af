// 数据库模块
// 包含数据库实体定义、存储抽象与 PostgreSQL / 内存实现

pub mod memory; // 内存实现，用于测试与本地运行
pub mod models; // 数据库实体定义
pub mod repositories; // 存储抽象与 PostgreSQL 实现

// 重新导出常用类型，方便其他模块使用
pub use memory::{MemoryAccountStore, MemoryCommentStore, MemoryPostStore};
pub use models::{Account, Comment, NewAccount, NewComment, NewPost, Post};
pub use repositories::{
    AccountStore, CommentStore, PgAccountStore, PgCommentStore, PgPostStore, PostStore,
    StoreResult,
};
