//! 进程内存储实现，行为与 PostgreSQL 表约束保持一致（邮箱唯一、ID 自增）。

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::database::models::{Account, Comment, NewAccount, NewComment, NewPost, Post};
use crate::database::repositories::{AccountStore, CommentStore, PostStore, StoreResult};
use crate::error::StoreError;

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> std::sync::MutexGuard<'_, Table<T>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
pub struct MemoryAccountStore {
    table: Mutex<Table<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_by_email(&self, email: &str) -> usize {
        lock(&self.table)
            .rows
            .values()
            .filter(|a| a.email == email)
            .count()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(lock(&self.table)
            .rows
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>> {
        Ok(lock(&self.table).rows.get(&id).cloned())
    }

    async fn insert(&self, account: NewAccount) -> StoreResult<Account> {
        let mut table = lock(&self.table);
        if table.rows.values().any(|a| a.email == account.email) {
            return Err(StoreError::UniqueViolation("accounts_email_key".into()));
        }

        let now = Utc::now();
        let account = Account {
            id: table.allocate_id(),
            email: account.email,
            password: account.password,
            nickname: account.nickname,
            phone: account.phone,
            role_code: account.role_code,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account) -> StoreResult<Account> {
        let mut table = lock(&self.table);
        let row = table
            .rows
            .get_mut(&account.id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;

        row.password = account.password.clone();
        row.nickname = account.nickname.clone();
        row.phone = account.phone.clone();
        row.role_code = account.role_code.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

#[derive(Default)]
pub struct MemoryPostStore {
    table: Mutex<Table<Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, post: NewPost) -> StoreResult<Post> {
        let mut table = lock(&self.table);
        let now = Utc::now();
        let post = Post {
            id: table.allocate_id(),
            title: post.title,
            image: post.image,
            visibility: post.visibility,
            content_markdown: post.content_markdown,
            content_html: post.content_html,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: &Post) -> StoreResult<Option<Post>> {
        let mut table = lock(&self.table);
        Ok(table.rows.get_mut(&post.id).map(|row| {
            row.title = post.title.clone();
            row.image = post.image.clone();
            row.visibility = post.visibility;
            row.content_markdown = post.content_markdown.clone();
            row.content_html = post.content_html.clone();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(lock(&self.table).rows.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>> {
        Ok(lock(&self.table).rows.get(&id).cloned())
    }

    async fn list_visible(&self, offset: i64, limit: i64) -> StoreResult<Vec<Post>> {
        // ID 单调递增，倒序即创建时间倒序
        Ok(lock(&self.table)
            .rows
            .values()
            .rev()
            .filter(|p| p.visibility)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_visible(&self) -> StoreResult<i64> {
        Ok(lock(&self.table).rows.values().filter(|p| p.visibility).count() as i64)
    }
}

#[derive(Default)]
pub struct MemoryCommentStore {
    table: Mutex<Table<Comment>>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn insert(&self, comment: NewComment) -> StoreResult<Comment> {
        let mut table = lock(&self.table);
        let comment = Comment {
            id: table.allocate_id(),
            content: comment.content,
            user_id: comment.user_id,
            post_id: comment.post_id,
            reply_to_comment_id: comment.reply_to_comment_id,
            created_at: Utc::now(),
        };
        table.rows.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Comment>> {
        Ok(lock(&self.table).rows.get(&id).cloned())
    }

    async fn list_by_post(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        Ok(lock(&self.table)
            .rows
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn delete_many(&self, ids: &[i64]) -> StoreResult<u64> {
        let mut table = lock(&self.table);
        Ok(ids.iter().filter(|id| table.rows.remove(*id).is_some()).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            email: email.into(),
            password: "hash".into(),
            nickname: "nick".into(),
            phone: "".into(),
            role_code: "user".into(),
        }
    }

    #[tokio::test]
    async fn account_insert_enforces_unique_email() {
        let store = MemoryAccountStore::new();
        let first = store.insert(new_account("a@b.com")).await.unwrap();
        assert_eq!(first.id, 1);

        let err = store.insert(new_account("a@b.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert_eq!(store.count_by_email("a@b.com"), 1);
    }

    #[tokio::test]
    async fn account_update_of_missing_row_fails() {
        let store = MemoryAccountStore::new();
        let mut account = store.insert(new_account("a@b.com")).await.unwrap();
        account.id = 99;
        assert!(store.update(&account).await.is_err());
    }

    #[tokio::test]
    async fn posts_list_newest_visible_first() {
        let store = MemoryPostStore::new();
        for title in ["one", "hidden", "two", "three"] {
            store
                .insert(NewPost {
                    title: title.into(),
                    image: String::new(),
                    visibility: title != "hidden",
                    content_markdown: String::new(),
                    content_html: String::new(),
                })
                .await
                .unwrap();
        }

        let page = store.list_visible(1, 5).await.unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["two", "one"]);
        assert_eq!(store.count_visible().await.unwrap(), 3);
    }
}
