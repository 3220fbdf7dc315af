mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{spawn_app, spawn_app_with, test_config};

#[tokio::test]
async fn create_renders_markdown_and_requires_auth() {
    let app = spawn_app();
    let payload = json!({ "title": "Hello", "content_markdown": "# Heading\n\n**bold**" });

    let (status, _) = app
        .post_json("/api/v1/post/createOnePost", None, payload.clone())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, access, _) = app.register_and_login("author@b.com", "secret1").await;
    let (status, body) = app
        .post_json("/api/v1/post/createOnePost", Some(&access), payload)
        .await;
    assert_eq!(status, StatusCode::OK);

    let html = body["resp_data"]["content_html"].as_str().unwrap();
    assert!(html.contains("<h1>Heading</h1>"));
    assert!(html.contains("<strong>bold</strong>"));
    assert_eq!(body["resp_data"]["visibility"], true);
}

#[tokio::test]
async fn crud_round_trip() {
    let app = spawn_app();
    let (_, access, _) = app.register_and_login("author@b.com", "secret1").await;

    let (_, body) = app
        .post_json(
            "/api/v1/post/createOnePost",
            Some(&access),
            json!({ "title": "Draft", "content_markdown": "first" }),
        )
        .await;
    let id = body["resp_data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post_json(
            "/api/v1/post/updateOnePost",
            Some(&access),
            json!({
                "id": id,
                "title": "Final",
                "visibility": false,
                "content_markdown": "_second_",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["title"], "Final");
    assert!(body["resp_data"]["content_html"].as_str().unwrap().contains("<em>second</em>"));

    assert_eq!(body["resp_data"]["visibility"], false);

    // 隐藏的文章不对外展示
    let (status, _) = app
        .post_json("/api/v1/post/getOnePost", None, json!({ "id": id }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .call(Method::GET, "/api/v1/post/getAllPosts?page=1&page_size=5", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["pagination"]["total"], 0);
    assert_eq!(body["resp_data"]["items"], json!([]));

    let (status, _) = app
        .post_json("/api/v1/post/deleteOnePost", Some(&access), json!({ "id": id }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post_json("/api/v1/post/getOnePost", None, json!({ "id": id }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "文章不存在");
}

#[tokio::test]
async fn write_routes_can_be_opened_by_config() {
    let app = spawn_app_with(test_config(false));
    let (status, body) = app
        .post_json(
            "/api/v1/post/createOnePost",
            None,
            json!({ "title": "Open", "content_markdown": "text" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["resp_data"]["content_html"].as_str().unwrap().contains("<p>text</p>"));
}

#[tokio::test]
async fn malformed_post_body_is_a_validation_error() {
    let app = spawn_app_with(test_config(false));
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/post/createOnePost")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn raw_html_in_markdown_is_stored_escaped() {
    let app = spawn_app();
    let (_, access, _) = app.register_and_login("author@b.com", "secret1").await;

    let (status, body) = app
        .post_json(
            "/api/v1/post/createOnePost",
            Some(&access),
            json!({
                "title": "Sneaky",
                "content_markdown": "hi <script>alert(1)</script>",
                "content_html": "<script>alert(2)</script>",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let html = body["resp_data"]["content_html"].as_str().unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)"));
}

#[tokio::test]
async fn bad_paging_query_gets_the_error_envelope() {
    let app = spawn_app();
    let (status, body) = app
        .call(Method::GET, "/api/v1/post/getAllPosts?page=abc", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);
    assert_eq!(body["msg"], "查询参数格式错误");
}
