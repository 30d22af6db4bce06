use serde::{Deserialize, Serialize};

use crate::auth::TokenPair;
use crate::types::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub fullname: String,
    pub password: String,
    pub avatar: String,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Login accepts a username or an email; either field may carry it.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAvatarRequest {
    pub avatar: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCoverImageRequest {
    pub cover_image: String,
}

#[derive(Debug, Deserialize)]
pub struct PublishVideoRequest {
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListVideosParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: String,
    pub description: String,
}

/// Body shape for toggle endpoints: which way the toggle went.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub toggled: &'static str,
}

impl ToggleResponse {
    #[must_use]
    pub fn added() -> Self {
        Self { toggled: "added" }
    }

    #[must_use]
    pub fn removed() -> Self {
        Self { toggled: "removed" }
    }
}
