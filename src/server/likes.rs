use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::ToggleResponse;
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::validate_id;
use crate::types::{LikeTarget, Toggle};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/toggle/{kind}/{id}", post(toggle_like))
        .route("/videos", get(liked_videos))
}

pub async fn toggle_like(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let user = auth.0;
    let store = state.store.as_ref();

    let target = LikeTarget::parse(&kind)
        .ok_or_else(|| ApiError::bad_request(format!("Unknown like target '{kind}'")))?;
    validate_id(&id, target.as_str())?;

    // Tweets live in another service; video and comment targets must exist.
    match target {
        LikeTarget::Video => {
            store
                .get_video(&id)
                .api_err("Failed to fetch video")?
                .or_not_found("Video not found")?;
        }
        LikeTarget::Comment => {
            store
                .get_comment(&id)
                .api_err("Failed to fetch comment")?
                .or_not_found("Comment not found")?;
        }
        LikeTarget::Tweet => {}
    }

    let outcome = store
        .toggle_like(&user.id, target, &id)
        .api_err("Failed to toggle like")?;

    let response = match outcome {
        Toggle::Added => ApiResponse::ok(ToggleResponse::added(), "Like added successfully"),
        Toggle::Removed => ApiResponse::ok(ToggleResponse::removed(), "Like removed successfully"),
    };

    Ok::<_, ApiError>(response)
}

pub async fn liked_videos(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let user = auth.0;

    let videos = state
        .store
        .list_liked_videos(&user.id)
        .api_err("Failed to fetch liked videos")?;

    Ok::<_, ApiError>(ApiResponse::ok(videos, "Liked videos fetched"))
}
