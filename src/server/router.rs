use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};

use crate::auth::TokenService;
use crate::config::AuthConfig;
use crate::store::Store;

use super::{comments, likes, playlists, subscriptions, users, videos};

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    pub auth: AuthConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, auth: AuthConfig) -> Self {
        Self {
            store,
            tokens: TokenService::new(&auth),
            auth,
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/users", users::router())
        .nest(
            "/api/v1/videos",
            videos::router().merge(comments::video_comments_router()),
        )
        .nest("/api/v1/comments", comments::router())
        .nest("/api/v1/likes", likes::router())
        .nest("/api/v1/subscriptions", subscriptions::router())
        .nest("/api/v1/playlists", playlists::router())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
