use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::{CreatePlaylistRequest, UpdatePlaylistRequest};
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::{require_fields, validate_id};
use crate::types::Playlist;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_playlist))
        .route("/user/{user_id}", get(user_playlists))
        .route("/{id}", get(get_playlist))
        .route("/{id}", patch(update_playlist))
        .route("/{id}", delete(delete_playlist))
        .route("/{id}/videos/{video_id}", post(add_video))
        .route("/{id}/videos/{video_id}", delete(remove_video))
}

pub async fn create_playlist(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePlaylistRequest>,
) -> impl IntoResponse {
    let user = auth.0;

    require_fields(&[("name", &req.name)])?;

    let now = Utc::now();
    let playlist = Playlist {
        id: Uuid::new_v4().to_string(),
        owner_id: user.id,
        name: req.name.trim().to_string(),
        description: req.description.trim().to_string(),
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_playlist(&playlist)
        .api_err("Failed to create playlist")?;

    Ok::<_, ApiError>(ApiResponse::created(
        playlist,
        "Playlist created successfully",
    ))
}

pub async fn user_playlists(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    validate_id(&user_id, "user")?;

    // Zero playlists is a valid empty list; only a missing user is a 404.
    store
        .get_user(&user_id)
        .api_err("Failed to fetch user")?
        .or_not_found("User not found")?;

    let playlists = store
        .list_user_playlists(&user_id)
        .api_err("Failed to fetch playlists")?;

    Ok::<_, ApiError>(ApiResponse::ok(playlists, "User playlists fetched"))
}

pub async fn get_playlist(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    validate_id(&id, "playlist")?;

    let detail = state
        .store
        .get_playlist_detail(&id)
        .api_err("Failed to fetch playlist")?
        .or_not_found("Playlist not found")?;

    Ok::<_, ApiError>(ApiResponse::ok(detail, "Playlist fetched"))
}

pub async fn update_playlist(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePlaylistRequest>,
) -> impl IntoResponse {
    let user = auth.0;

    validate_id(&id, "playlist")?;
    require_fields(&[("name", &req.name), ("description", &req.description)])?;

    let updated = state
        .store
        .update_playlist(&id, &user.id, req.name.trim(), req.description.trim())
        .api_err("Failed to update playlist")?
        .or_not_found("Playlist not found")?;

    Ok::<_, ApiError>(ApiResponse::ok(updated, "Playlist updated"))
}

pub async fn delete_playlist(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let user = auth.0;

    validate_id(&id, "playlist")?;

    let deleted = state
        .store
        .delete_playlist(&id, &user.id)
        .api_err("Failed to delete playlist")?;
    if !deleted {
        return Err(ApiError::not_found("Playlist not found"));
    }

    Ok::<_, ApiError>(ApiResponse::ok(serde_json::json!({}), "Playlist deleted"))
}

pub async fn add_video(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path((id, video_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let user = auth.0;
    let store = state.store.as_ref();

    validate_id(&id, "playlist")?;
    validate_id(&video_id, "video")?;

    let playlist = store
        .get_playlist(&id)
        .api_err("Failed to fetch playlist")?
        .or_not_found("Playlist not found")?;
    if playlist.owner_id != user.id {
        return Err(ApiError::not_found("Playlist not found"));
    }

    store
        .get_video(&video_id)
        .api_err("Failed to fetch video")?
        .or_not_found("Video not found")?;

    store
        .add_playlist_video(&id, &video_id)
        .api_err("Failed to add video to playlist")?;

    Ok::<_, ApiError>(ApiResponse::ok(
        serde_json::json!({}),
        "Video added to playlist",
    ))
}

pub async fn remove_video(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path((id, video_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let user = auth.0;
    let store = state.store.as_ref();

    validate_id(&id, "playlist")?;
    validate_id(&video_id, "video")?;

    let playlist = store
        .get_playlist(&id)
        .api_err("Failed to fetch playlist")?
        .or_not_found("Playlist not found")?;
    if playlist.owner_id != user.id {
        return Err(ApiError::not_found("Playlist not found"));
    }

    let removed = store
        .remove_playlist_video(&id, &video_id)
        .api_err("Failed to remove video from playlist")?;
    if !removed {
        return Err(ApiError::not_found("Video not in playlist"));
    }

    Ok::<_, ApiError>(ApiResponse::ok(
        serde_json::json!({}),
        "Video removed from playlist",
    ))
}
