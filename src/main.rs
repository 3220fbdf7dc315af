use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use jank_blog::{
    AppState,
    cache::RedisSessionCache,
    config::Config,
    database::{PgAccountStore, PgCommentStore, PgPostStore},
    middleware::{RateLimiter, rate_limit},
    router::create_router,
    utils::BackgroundTasks,
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {e}"))?;

    // 设置数据库连接池
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'jank_blog';").await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // 设置 Redis 客户端
    let redis = Arc::new(redis::Client::open(config.redis_url.clone())?);

    // 设置应用状态
    let background = BackgroundTasks::new();
    let state = AppState::new(
        config,
        Arc::new(PgAccountStore::new(pool.clone())),
        Arc::new(PgPostStore::new(pool.clone())),
        Arc::new(PgCommentStore::new(pool)),
        Arc::new(RedisSessionCache::new(redis.clone())),
        background.clone(),
    );

    // 设置限流器
    let rate_limiter = Arc::new(RateLimiter::new(redis, state.config.clone()));

    let router = create_router(state.clone())
        .layer(axum::middleware::from_fn_with_state(rate_limiter, rate_limit));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(&addr).await?,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // 等待登出缓存删除等后台任务完成
    background.wait_idle().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
