pub mod account;
pub mod comment;
pub mod post;

pub use account::{AccountStore, PgAccountStore};
pub use comment::{CommentStore, PgCommentStore};
pub use post::{PgPostStore, PostStore};

use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

// 唯一约束冲突单独区分，其余原样透传
pub(crate) fn map_db_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StoreError::UniqueViolation(db.constraint().unwrap_or("unique").to_string());
        }
    }
    StoreError::Database(e)
}
