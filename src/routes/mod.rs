// Routes module - organizes all HTTP endpoints
// Each sub-module handles a specific domain

pub mod auth;
pub mod categories;
pub mod news;
pub mod users;

use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::app_state::SharedState;

/// Level of the per-request span and its request/response events
pub const REQUEST_LOG_LEVEL: Level = Level::INFO;

pub fn router(state: SharedState) -> Router {
    Router::new()
        // ===== CATEGORIES =====
        .route("/categories", get(categories::list_categories))
        .route("/categories/seed", post(categories::seed_categories))
        // ===== NEWS FEED & MODERATION =====
        .route("/news", get(news::list_verified).post(news::submit_news))
        .route("/news/pending", get(news::list_pending))
        .route("/news/admin", post(news::admin_create))
        .route("/news/:id/verify", post(news::verify_news))
        .route("/news/:id", delete(news::delete_news))
        // ===== USERS & ADMINS =====
        .route("/users/me", get(users::current_user))
        .route("/users/admins", post(users::make_admin))
        .route("/users/admins/init", post(users::init_first_admin))
        // ===== AUTHENTICATION =====
        .route("/auth/signup", post(auth::sign_up))
        .route("/auth/signin", post(auth::sign_in))
        .route("/auth/anonymous", post(auth::sign_in_anonymous))
        .route("/auth/signout", post(auth::sign_out))
        // ===== HEALTH CHECK =====
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(REQUEST_LOG_LEVEL))
                        .on_request(DefaultOnRequest::new().level(REQUEST_LOG_LEVEL))
                        .on_response(DefaultOnResponse::new().level(REQUEST_LOG_LEVEL)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any)
                        .max_age(Duration::from_secs(60 * 60)),
                ),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "truthdesk - online"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LOG_FILTER;
    use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

    #[test]
    fn test_default_filter_shows_request_traces() {
        let subscriber = tracing_subscriber::registry().with(EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "tower_http::trace::on_response", REQUEST_LOG_LEVEL));
            assert!(tracing::enabled!(target: "tower_http::trace::make_span", REQUEST_LOG_LEVEL));
            assert!(!tracing::enabled!(target: "tower_http::trace::on_response", Level::DEBUG));
        });
    }
}
