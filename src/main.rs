//! StoryHub - 故事阅读 BFF
//!
//! 组合根：加载配置、初始化日志和数据库，显式构造服务后启动 HTTP 服务器

use std::sync::Arc;

use storyhub::application::RetryPolicy;
use storyhub::config::{load_config, print_config, LogConfig};
use storyhub::infrastructure::http::{AppState, HttpServer, ServerConfig};
use storyhub::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteAuthorRepository, SqliteStoryRepository,
};
use storyhub::infrastructure::TracingTelemetry;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},storyhub={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("StoryHub - story BFF starting");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // Repository 适配器
    let story_repo = Arc::new(SqliteStoryRepository::new(pool.clone()));
    let author_repo = Arc::new(SqliteAuthorRepository::new(pool));

    let retry = RetryPolicy::new(config.retry.max_attempts, config.retry.base_delay());
    let telemetry = TracingTelemetry::new().arc();

    let state = AppState::new(story_repo, author_repo, retry, telemetry);
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
