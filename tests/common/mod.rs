#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use jank_blog::{
    AppState,
    cache::MemorySessionCache,
    config::Config,
    database::{MemoryAccountStore, MemoryCommentStore, MemoryPostStore},
    router::create_router,
    utils::BackgroundTasks,
};
use serde_json::{Value, json};
use tower::ServiceExt;

const TEST_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub accounts: Arc<MemoryAccountStore>,
    pub sessions: Arc<MemorySessionCache>,
    pub background: BackgroundTasks,
}

pub fn test_config(post_write_requires_auth: bool) -> Config {
    Config {
        database_url: "postgres://unused".into(),
        redis_url: "redis://unused".into(),
        jwt_secret: "integration-test-secret".into(),
        access_token_expiration_secs: 900,
        refresh_token_expiration_secs: 604_800,
        bcrypt_cost: TEST_COST,
        rate_limit_window_secs: 60,
        rate_limit_requests: 100,
        server_host: "127.0.0.1".into(),
        server_port: 0,
        api_base_uri: "/api/v1".into(),
        post_write_requires_auth,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config(true))
}

pub fn spawn_app_with(config: Config) -> TestApp {
    let accounts = Arc::new(MemoryAccountStore::new());
    let sessions = Arc::new(MemorySessionCache::new());
    let background = BackgroundTasks::new();
    let state = AppState::new(
        config,
        accounts.clone(),
        Arc::new(MemoryPostStore::new()),
        Arc::new(MemoryCommentStore::new()),
        sessions.clone(),
        background.clone(),
    );

    TestApp {
        router: create_router(state),
        accounts,
        sessions,
        background,
    }
}

impl TestApp {
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    /// 注册并登录，返回 (user_id, access_token, refresh_token)
    pub async fn register_and_login(&self, email: &str, password: &str) -> (i64, String, String) {
        let (status, body) = self
            .post_json(
                "/api/v1/account/registerAccount",
                None,
                json!({ "email": email, "password": password, "nickname": "tester" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");

        let (status, body) = self
            .post_json(
                "/api/v1/account/loginAccount",
                None,
                json!({ "email": email, "password": password, "img_verification_code": "" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        let data = &body["resp_data"];
        (
            data["user_id"].as_i64().unwrap(),
            data["access_token"].as_str().unwrap().to_string(),
            data["refresh_token"].as_str().unwrap().to_string(),
        )
    }
}
