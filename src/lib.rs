use std::sync::Arc;

use cache::SessionCache;
use config::Config;
use database::repositories::{AccountStore, CommentStore, PostStore};
use services::{AccountService, CommentService, PostService};
use utils::{BackgroundTasks, TokenIssuer};

pub mod cache;
pub mod common;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod services;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tokens: Arc<TokenIssuer>,
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
}

impl AppState {
    pub fn new(
        config: Config,
        account_store: Arc<dyn AccountStore>,
        post_store: Arc<dyn PostStore>,
        comment_store: Arc<dyn CommentStore>,
        sessions: Arc<dyn SessionCache>,
        background: BackgroundTasks,
    ) -> Self {
        let tokens = Arc::new(TokenIssuer::from_config(&config));
        let accounts = Arc::new(AccountService::new(
            account_store,
            sessions,
            tokens.clone(),
            background,
            config.bcrypt_cost,
        ));

        Self {
            config: Arc::new(config),
            tokens,
            accounts,
            posts: Arc::new(PostService::new(post_store.clone())),
            comments: Arc::new(CommentService::new(comment_store, post_store)),
        }
    }
}
