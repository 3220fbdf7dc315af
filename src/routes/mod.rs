// 路由处理函数与请求/响应数据结构，按业务分组

pub mod account;
pub mod comment;
pub mod post;
