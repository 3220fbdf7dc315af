mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::spawn_app;

#[tokio::test]
async fn comment_graph_nests_replies() {
    let app = spawn_app();
    let (alice, alice_token, _) = app.register_and_login("alice@b.com", "secret1").await;
    let (bob, bob_token, _) = app.register_and_login("bob@b.com", "secret1").await;

    let (_, body) = app
        .post_json(
            "/api/v1/post/createOnePost",
            Some(&alice_token),
            json!({ "title": "Post", "content_markdown": "body" }),
        )
        .await;
    let post_id = body["resp_data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post_json(
            "/api/v1/comment/createOneComment",
            Some(&alice_token),
            json!({ "post_id": post_id, "content": "first!" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let root_id = body["resp_data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .post_json(
            "/api/v1/comment/createOneComment",
            Some(&bob_token),
            json!({ "post_id": post_id, "content": "reply", "reply_to_comment_id": root_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post_json("/api/v1/comment/getCommentGraph", None, json!({ "post_id": post_id }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let graph = body["resp_data"].as_array().unwrap();
    assert_eq!(graph.len(), 1);
    assert_eq!(graph[0]["user_id"], alice);
    assert_eq!(graph[0]["replies"][0]["user_id"], bob);
    assert_eq!(graph[0]["replies"][0]["reply_to_comment_id"], root_id);

    // 非作者不能删除
    let (status, _) = app
        .post_json("/api/v1/comment/deleteOneComment", Some(&bob_token), json!({ "id": root_id }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post_json("/api/v1/comment/deleteOneComment", Some(&alice_token), json!({ "id": root_id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["deleted"], 2);
}

#[tokio::test]
async fn commenting_requires_auth_and_existing_post() {
    let app = spawn_app();
    let (status, _) = app
        .post_json(
            "/api/v1/comment/createOneComment",
            None,
            json!({ "post_id": 1, "content": "hi" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, token, _) = app.register_and_login("alice@b.com", "secret1").await;
    let (status, body) = app
        .post_json(
            "/api/v1/comment/createOneComment",
            Some(&token),
            json!({ "post_id": 404, "content": "hi" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "文章不存在");
}
