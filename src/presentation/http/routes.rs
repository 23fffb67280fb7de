use super::{
    handlers::{
        admin_comments, articles, auth, categories, comments, health, profile, settings, social,
        stats, system, users,
    },
    middleware::auth::{require_admin, require_auth, require_developer},
    middleware::rate_limit::auth_rate_limit_middleware,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_rate_limit_middleware,
        ));

    let account_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/me/bookmarks", get(social::list_my_bookmarks))
        .route(
            "/api/v1/me/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin_routes = Router::new()
        .route("/api/v1/admin/categories", post(categories::create_category))
        .route("/api/v1/admin/articles", post(articles::create_article))
        .route(
            "/api/v1/admin/articles/{id}",
            put(articles::update_article).delete(articles::delete_article),
        )
        .route("/api/v1/admin/comments", get(admin_comments::list_comments))
        .route(
            "/api/v1/admin/comments/pending",
            get(admin_comments::list_pending_comments),
        )
        .route(
            "/api/v1/admin/comments/{id}/approve",
            put(admin_comments::approve_comment),
        )
        .route(
            "/api/v1/admin/comments/{id}",
            delete(admin_comments::delete_comment),
        )
        .route("/api/v1/admin/statistics", get(stats::get_statistics))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let dev_routes = Router::new()
        .route("/api/v1/dev/users", get(users::list_users))
        .route("/api/v1/dev/users/{id}/role", post(users::change_user_role))
        .route("/api/v1/dev/user-logs", get(users::list_user_logs))
        .route(
            "/api/v1/dev/settings",
            get(settings::list_settings).post(settings::upsert_setting),
        )
        .route("/api/v1/dev/settings/{key}", delete(settings::delete_setting))
        .route("/api/v1/dev/system", get(system::system_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_developer,
        ));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Categories
        .route("/api/v1/categories", get(categories::list_categories))
        // Articles; the `{article}` segment is a slug on the detail route and
        // a numeric id on the engagement routes below it
        .route("/api/v1/articles", get(articles::list_articles))
        .route("/api/v1/articles/{article}", get(articles::get_article_by_slug))
        .route(
            "/api/v1/articles/{article}/comments",
            get(comments::get_article_comments).post(comments::create_comment),
        )
        .route("/api/v1/articles/{article}/like", post(social::toggle_like))
        .route(
            "/api/v1/articles/{article}/bookmark",
            post(social::toggle_bookmark),
        )
        // Site settings (public read of a single key)
        .route("/api/v1/settings/{key}", get(settings::get_setting))
        .merge(auth_routes)
        .merge(account_routes)
        .merge(admin_routes)
        .merge(dev_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
