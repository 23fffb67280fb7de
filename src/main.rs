use std::sync::Arc;
use std::time::{Duration, Instant};

use http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use warta_api::{
    application::change_role::use_case::ChangeRoleUseCase,
    config::Config,
    infrastructure::{
        database::pool::create_pool,
        repositories::{
            sqlx_audit_repository::SqlxAuditLogRepository,
            sqlx_comment_repository::SqlxCommentRepository,
            sqlx_social_repository::SqlxSocialRepository,
            sqlx_user_repository::SqlxUserRepository,
        },
        security::comment_moderator::CommentModerator,
    },
    presentation::http::{routes::create_router, state::AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,warta_api=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(config.ignore_missing_migrations);
    migrator.run(&db).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;

    let moderator = Arc::new(match config.moderation_denylist_tokens() {
        Some(tokens) => CommentModerator::new(tokens),
        None => CommentModerator::with_default_denylist(),
    });

    let user_repo = Arc::new(SqlxUserRepository::new(db.clone()));
    let state = AppState {
        db: db.clone(),
        redis,
        config: config.clone(),
        user_repo: user_repo.clone(),
        comment_repo: Arc::new(SqlxCommentRepository::new(db.clone())),
        social_repo: Arc::new(SqlxSocialRepository::new(db.clone())),
        audit_repo: Arc::new(SqlxAuditLogRepository::new(db.clone())),
        moderator,
        change_role: Arc::new(ChangeRoleUseCase::new(user_repo)),
        started_at: Instant::now(),
    };

    // Development allows any origin; production restricts to the web client.
    let cors = if cfg!(debug_assertions) {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        let origins = config
            .frontend_url
            .parse::<HeaderValue>()
            .map(|origin| AllowOrigin::list(vec![origin]))
            .unwrap_or_else(|_| AllowOrigin::list(vec![]));
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    };

    let app = create_router(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("warta api listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
