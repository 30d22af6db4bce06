use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::{CommentRequest, PaginationParams};
use crate::server::response::{
    ApiError, ApiResponse, DEFAULT_PAGE_SIZE, StoreOptionExt, StoreResultExt,
};
use crate::server::validation::{require_fields, validate_id};
use crate::types::Comment;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{id}", patch(update_comment))
        .route("/{id}", delete(delete_comment))
}

/// Comment listing and creation hang off the parent video route.
pub fn video_comments_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{id}/comments", get(list_comments))
        .route("/{id}/comments", post(add_comment))
}

pub async fn list_comments(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    validate_id(&video_id, "video")?;

    // 404 is for a missing parent; a video with zero comments is an empty page.
    store
        .get_video(&video_id)
        .api_err("Failed to fetch video")?
        .or_not_found("Video not found")?;

    let page = store
        .list_video_comments(
            &video_id,
            params.page.unwrap_or(1).max(1),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100),
        )
        .api_err("Failed to list comments")?;

    Ok::<_, ApiError>(ApiResponse::ok(page, "Video comments fetched"))
}

pub async fn add_comment(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> impl IntoResponse {
    let user = auth.0;
    let store = state.store.as_ref();

    validate_id(&video_id, "video")?;
    require_fields(&[("content", &req.content)])?;

    store
        .get_video(&video_id)
        .api_err("Failed to fetch video")?
        .or_not_found("Video not found")?;

    let now = Utc::now();
    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        video_id,
        owner_id: user.id,
        content: req.content.trim().to_string(),
        created_at: now,
        updated_at: now,
    };

    store
        .create_comment(&comment)
        .api_err("Failed to add comment")?;

    Ok::<_, ApiError>(ApiResponse::created(comment, "Comment added successfully"))
}

pub async fn update_comment(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> impl IntoResponse {
    let user = auth.0;

    validate_id(&id, "comment")?;
    require_fields(&[("content", &req.content)])?;

    let updated = state
        .store
        .update_comment(&id, &user.id, req.content.trim())
        .api_err("Failed to update comment")?
        .or_not_found("Comment not found or not owned by you")?;

    Ok::<_, ApiError>(ApiResponse::ok(updated, "Comment updated"))
}

pub async fn delete_comment(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let user = auth.0;

    validate_id(&id, "comment")?;

    let deleted = state
        .store
        .delete_comment(&id, &user.id)
        .api_err("Failed to delete comment")?;
    if !deleted {
        return Err(ApiError::not_found("Comment not found or not owned by you"));
    }

    Ok::<_, ApiError>(ApiResponse::ok(serde_json::json!({}), "Comment deleted"))
}
