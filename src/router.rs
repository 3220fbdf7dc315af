use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors, markdown_render},
    routes,
};

// 账户相关的路由
fn account_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/registerAccount", post(routes::account::register_account))
        .route("/loginAccount", post(routes::account::login_account))
        .route("/refreshToken", post(routes::account::refresh_token));

    let protected = Router::new()
        .route("/logoutAccount", post(routes::account::logout_account))
        .route("/resetPassword", post(routes::account::reset_password))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}

// 文章相关的路由，创建与更新先经过 markdown 渲染
fn post_routes(state: &AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/getOnePost", post(routes::post::get_one_post))
        .route("/getAllPosts", get(routes::post::get_all_posts));

    let write = Router::new()
        .route(
            "/createOnePost",
            post(routes::post::create_one_post).layer(from_fn(markdown_render)),
        )
        .route(
            "/updateOnePost",
            post(routes::post::update_one_post).layer(from_fn(markdown_render)),
        )
        .route("/deleteOnePost", post(routes::post::delete_one_post));

    let write = if state.config.post_write_requires_auth {
        write.route_layer(from_fn_with_state(state.clone(), auth_middleware))
    } else {
        tracing::warn!("Post write routes are open without authentication");
        write
    };

    read.merge(write)
}

// 评论相关的路由
fn comment_routes(state: &AppState) -> Router<AppState> {
    let public =
        Router::new().route("/getCommentGraph", post(routes::comment::get_comment_graph));

    let protected = Router::new()
        .route("/createOneComment", post(routes::comment::create_one_comment))
        .route("/deleteOneComment", post(routes::comment::delete_one_comment))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}

/// 创建主路由：`{api_base_uri}/account`、`/post`、`/comment` 三个路由组
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/account", account_routes(&state))
        .nest("/post", post_routes(&state))
        .nest("/comment", comment_routes(&state));

    Router::new()
        .nest(&state.config.api_base_uri, api)
        .layer(from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
