use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub fullname: String,
    #[serde(skip)]
    pub password_hash: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection of a user safe to embed in joined read views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: String,
    pub username: String,
    pub fullname: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub owner_id: String,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub video_id: String,
    pub owner_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a like points at. Exactly one target per row, enforced by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeTarget {
    Video,
    Comment,
    Tweet,
}

impl LikeTarget {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LikeTarget::Video => "video",
            LikeTarget::Comment => "comment",
            LikeTarget::Tweet => "tweet",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "video" => Some(LikeTarget::Video),
            "comment" => Some(LikeTarget::Comment),
            "tweet" => Some(LikeTarget::Tweet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a create-or-delete toggle on likes and subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

// Denormalized read views assembled by the store in a single query.

#[derive(Debug, Clone, Serialize)]
pub struct VideoWithOwner {
    #[serde(flatten)]
    pub video: Video,
    pub owner: UserPublic,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentWithOwner {
    #[serde(flatten)]
    pub comment: Comment,
    pub owner: UserPublic,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub fullname: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub subscribers_count: i64,
    pub channels_subscribed_to_count: i64,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistDetail {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub owner: UserPublic,
    pub videos: Vec<Video>,
}

/// Page of results plus the metadata the paginate-aware queries compute.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page: i64, limit: i64, total_items: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_items + limit - 1) / limit
        } else {
            0
        };
        Self {
            items,
            page,
            limit,
            total_items,
            total_pages,
        }
    }
}
