// 业务服务层
// 组合存储、缓存与令牌签发，供路由处理函数调用

pub mod account;
pub mod comment;
pub mod post;

pub use account::AccountService;
pub use comment::CommentService;
pub use post::PostService;
