use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreResult, map_db_error};
use crate::database::models::{Account, NewAccount};
use crate::error::StoreError;

/// 账户存储
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>>;

    /// 插入账户并返回分配了 ID 的记录
    async fn insert(&self, account: NewAccount) -> StoreResult<Account>;

    /// 按 ID 更新可变字段
    async fn update(&self, account: &Account) -> StoreResult<Account>;
}

/// 账户存储 PostgreSQL 实现
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ACCOUNT_COLUMNS: &str =
    "id, email, password, nickname, phone, role_code, created_at, updated_at";

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn insert(&self, account: NewAccount) -> StoreResult<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (email, password, nickname, phone, role_code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&account.email)
        .bind(&account.password)
        .bind(&account.nickname)
        .bind(&account.phone)
        .bind(&account.role_code)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        tracing::debug!(account_id = account.id, "Inserted account");
        Ok(account)
    }

    async fn update(&self, account: &Account) -> StoreResult<Account> {
        let updated = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET password = $1, nickname = $2, phone = $3, role_code = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&account.password)
        .bind(&account.nickname)
        .bind(&account.phone)
        .bind(&account.role_code)
        .bind(account.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        updated.ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }
}
