mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Sort column whitelist for video listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSort {
    #[default]
    CreatedAt,
    Title,
    Views,
    Duration,
}

impl VideoSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(VideoSort::CreatedAt),
            "title" => Some(VideoSort::Title),
            "views" => Some(VideoSort::Views),
            "duration" => Some(VideoSort::Duration),
            _ => None,
        }
    }

    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            VideoSort::CreatedAt => "v.created_at",
            VideoSort::Title => "v.title",
            VideoSort::Views => "v.views",
            VideoSort::Duration => "v.duration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Filter, sort, and pagination parameters for listing videos.
#[derive(Debug, Clone, Default)]
pub struct VideoQuery {
    /// Case-insensitive substring match on the title.
    pub query: Option<String>,
    pub owner_id: Option<String>,
    pub sort_by: VideoSort,
    pub sort_direction: SortDirection,
    pub page: i64,
    pub limit: i64,
}

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // User operations
    fn create_user(&self, user: &User) -> Result<()>;
    fn get_user(&self, id: &str) -> Result<Option<User>>;
    fn get_user_by_login(&self, identity: &str) -> Result<Option<User>>;
    fn username_or_email_exists(&self, username: &str, email: &str) -> Result<bool>;
    fn update_user(&self, user: &User) -> Result<()>;
    fn update_password(&self, user_id: &str, password_hash: &str) -> Result<()>;

    // Refresh-token lifecycle. `set` overwrites unconditionally (login/logout);
    // `swap` is a compare-and-swap that only succeeds when the stored value
    // still equals `current`, which is the rotation revocation check.
    fn set_refresh_token(&self, user_id: &str, token: Option<&str>) -> Result<()>;
    fn swap_refresh_token(&self, user_id: &str, current: &str, next: &str) -> Result<bool>;

    // Aggregated user views
    fn get_channel_profile(&self, username: &str, viewer_id: &str)
    -> Result<Option<ChannelProfile>>;
    fn get_watch_history(&self, user_id: &str) -> Result<Vec<VideoWithOwner>>;
    fn add_watch_history(&self, user_id: &str, video_id: &str) -> Result<()>;

    // Video operations
    fn create_video(&self, video: &Video) -> Result<()>;
    fn get_video(&self, id: &str) -> Result<Option<Video>>;
    fn get_video_with_owner(&self, id: &str) -> Result<Option<VideoWithOwner>>;
    fn list_videos(&self, query: &VideoQuery) -> Result<Page<VideoWithOwner>>;
    fn update_video(&self, video: &Video) -> Result<()>;
    fn delete_video(&self, id: &str, owner_id: &str) -> Result<bool>;
    fn set_video_published(&self, id: &str, owner_id: &str, published: bool) -> Result<bool>;
    fn increment_video_views(&self, id: &str) -> Result<()>;

    // Comment operations
    fn create_comment(&self, comment: &Comment) -> Result<()>;
    fn get_comment(&self, id: &str) -> Result<Option<Comment>>;
    fn list_video_comments(
        &self,
        video_id: &str,
        page: i64,
        limit: i64,
    ) -> Result<Page<CommentWithOwner>>;
    fn update_comment(&self, id: &str, owner_id: &str, content: &str) -> Result<Option<Comment>>;
    fn delete_comment(&self, id: &str, owner_id: &str) -> Result<bool>;

    // Like operations
    fn toggle_like(&self, user_id: &str, target: LikeTarget, target_id: &str) -> Result<Toggle>;
    fn list_liked_videos(&self, user_id: &str) -> Result<Vec<VideoWithOwner>>;

    // Subscription operations
    fn toggle_subscription(&self, subscriber_id: &str, channel_id: &str) -> Result<Toggle>;
    fn list_channel_subscribers(&self, channel_id: &str) -> Result<Vec<UserPublic>>;
    fn list_subscribed_channels(&self, subscriber_id: &str) -> Result<Vec<UserPublic>>;

    // Playlist operations
    fn create_playlist(&self, playlist: &Playlist) -> Result<()>;
    fn get_playlist(&self, id: &str) -> Result<Option<Playlist>>;
    fn get_playlist_detail(&self, id: &str) -> Result<Option<PlaylistDetail>>;
    fn list_user_playlists(&self, owner_id: &str) -> Result<Vec<Playlist>>;
    fn update_playlist(
        &self,
        id: &str,
        owner_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Playlist>>;
    fn delete_playlist(&self, id: &str, owner_id: &str) -> Result<bool>;
    fn add_playlist_video(&self, playlist_id: &str, video_id: &str) -> Result<()>;
    fn remove_playlist_video(&self, playlist_id: &str, video_id: &str) -> Result<bool>;
}
