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
use crate::server::dto::{ListVideosParams, PublishVideoRequest, UpdateVideoRequest};
use crate::server::response::{
    ApiError, ApiResponse, DEFAULT_PAGE_SIZE, StoreOptionExt, StoreResultExt,
};
use crate::server::validation::{require_fields, validate_id};
use crate::store::{SortDirection, VideoQuery, VideoSort};
use crate::types::Video;

const MAX_PAGE_SIZE: i64 = 100;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_videos))
        .route("/", post(publish_video))
        .route("/{id}", get(get_video))
        .route("/{id}", patch(update_video))
        .route("/{id}", delete(delete_video))
        .route("/{id}/toggle-publish", patch(toggle_publish))
}

pub async fn list_videos(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListVideosParams>,
) -> impl IntoResponse {
    let sort_by = match params.sort_by.as_deref() {
        None => VideoSort::default(),
        Some(raw) => VideoSort::parse(raw)
            .ok_or_else(|| ApiError::bad_request(format!("Unknown sort field '{raw}'")))?,
    };
    let sort_direction = match params.sort_dir.as_deref() {
        None => SortDirection::default(),
        Some(raw) => SortDirection::parse(raw)
            .ok_or_else(|| ApiError::bad_request(format!("Unknown sort direction '{raw}'")))?,
    };

    if let Some(ref owner) = params.user_id {
        validate_id(owner, "user")?;
    }

    let query = VideoQuery {
        query: params.query.filter(|q| !q.trim().is_empty()),
        owner_id: params.user_id,
        sort_by,
        sort_direction,
        page: params.page.unwrap_or(1).max(1),
        limit: params
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
    };

    let page = state
        .store
        .list_videos(&query)
        .api_err("Failed to list videos")?;

    Ok::<_, ApiError>(ApiResponse::ok(page, "Videos fetched"))
}

pub async fn publish_video(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<PublishVideoRequest>,
) -> impl IntoResponse {
    let owner = auth.0;

    require_fields(&[
        ("title", &req.title),
        ("description", &req.description),
        ("video_file", &req.video_file),
        ("thumbnail", &req.thumbnail),
    ])?;

    let now = Utc::now();
    let video = Video {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.id,
        video_file: req.video_file,
        thumbnail: req.thumbnail,
        title: req.title.trim().to_string(),
        description: req.description.trim().to_string(),
        duration: req.duration,
        views: 0,
        is_published: true,
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_video(&video)
        .api_err("Failed to publish video")?;

    Ok::<_, ApiError>(ApiResponse::created(video, "Video published successfully"))
}

pub async fn get_video(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let viewer = auth.0;
    let store = state.store.as_ref();

    validate_id(&id, "video")?;

    let mut item = store
        .get_video_with_owner(&id)
        .api_err("Failed to fetch video")?
        .or_not_found("Video not found")?;

    // Unpublished videos are visible to their owner only.
    if !item.video.is_published && item.video.owner_id != viewer.id {
        return Err(ApiError::not_found("Video not found"));
    }

    store
        .increment_video_views(&id)
        .api_err("Failed to count view")?;
    store
        .add_watch_history(&viewer.id, &id)
        .api_err("Failed to record watch history")?;
    item.video.views += 1;

    Ok::<_, ApiError>(ApiResponse::ok(item, "Video fetched"))
}

pub async fn update_video(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVideoRequest>,
) -> impl IntoResponse {
    let owner = auth.0;
    let store = state.store.as_ref();

    validate_id(&id, "video")?;

    let mut video = store
        .get_video(&id)
        .api_err("Failed to fetch video")?
        .or_not_found("Video not found")?;
    if video.owner_id != owner.id {
        return Err(ApiError::not_found("Video not found"));
    }

    if let Some(title) = req.title {
        require_fields(&[("title", &title)])?;
        video.title = title.trim().to_string();
    }
    if let Some(description) = req.description {
        require_fields(&[("description", &description)])?;
        video.description = description.trim().to_string();
    }
    if let Some(thumbnail) = req.thumbnail {
        require_fields(&[("thumbnail", &thumbnail)])?;
        video.thumbnail = thumbnail;
    }

    store
        .update_video(&video)
        .api_err("Failed to update video")?;

    Ok::<_, ApiError>(ApiResponse::ok(video, "Video updated"))
}

pub async fn delete_video(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let owner = auth.0;

    validate_id(&id, "video")?;

    let deleted = state
        .store
        .delete_video(&id, &owner.id)
        .api_err("Failed to delete video")?;
    if !deleted {
        return Err(ApiError::not_found("Video not found"));
    }

    Ok::<_, ApiError>(ApiResponse::ok(serde_json::json!({}), "Video deleted"))
}

pub async fn toggle_publish(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let owner = auth.0;
    let store = state.store.as_ref();

    validate_id(&id, "video")?;

    let mut video = store
        .get_video(&id)
        .api_err("Failed to fetch video")?
        .or_not_found("Video not found")?;
    if video.owner_id != owner.id {
        return Err(ApiError::not_found("Video not found"));
    }

    video.is_published = !video.is_published;
    let updated = store
        .set_video_published(&id, &owner.id, video.is_published)
        .api_err("Failed to toggle publish status")?;
    if !updated {
        return Err(ApiError::not_found("Video not found"));
    }

    Ok::<_, ApiError>(ApiResponse::ok(video, "Publish status toggled"))
}
