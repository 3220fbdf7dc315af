use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 账户角色默认值
pub const DEFAULT_ROLE_CODE: &str = "user";

/// 账户数据库实体
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    /// bcrypt 哈希，不会序列化给调用方
    #[serde(skip_serializing)]
    pub password: String,
    pub nickname: String,
    pub phone: String,
    pub role_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待插入的账户
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub phone: String,
    pub role_code: String,
}
