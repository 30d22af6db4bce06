use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use super::Store;
use super::schema::SCHEMA;
use super::{SortDirection, VideoQuery};
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

const USER_COLS: &str =
    "id, username, email, fullname, password_hash, avatar, cover_image, refresh_token, \
     created_at, updated_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        fullname: row.get(3)?,
        password_hash: row.get(4)?,
        avatar: row.get(5)?,
        cover_image: row.get(6)?,
        refresh_token: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
        updated_at: parse_datetime(&row.get::<_, String>(9)?),
    })
}

const VIDEO_COLS: &str = "v.id, v.owner_id, v.video_file, v.thumbnail, v.title, v.description, \
     v.duration, v.views, v.is_published, v.created_at, v.updated_at";

fn video_from_row(row: &Row<'_>) -> rusqlite::Result<Video> {
    Ok(Video {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        video_file: row.get(2)?,
        thumbnail: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        duration: row.get(6)?,
        views: row.get(7)?,
        is_published: row.get(8)?,
        created_at: parse_datetime(&row.get::<_, String>(9)?),
        updated_at: parse_datetime(&row.get::<_, String>(10)?),
    })
}

/// Owner projection appended after the 11 video columns in joined queries.
const OWNER_COLS: &str = "u.id, u.username, u.fullname, u.avatar, u.cover_image";

fn owner_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<UserPublic> {
    Ok(UserPublic {
        id: row.get(offset)?,
        username: row.get(offset + 1)?,
        fullname: row.get(offset + 2)?,
        avatar: row.get(offset + 3)?,
        cover_image: row.get(offset + 4)?,
    })
}

fn video_with_owner_from_row(row: &Row<'_>) -> rusqlite::Result<VideoWithOwner> {
    Ok(VideoWithOwner {
        video: video_from_row(row)?,
        owner: owner_from_row(row, 11)?,
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // User operations

    fn create_user(&self, user: &User) -> Result<()> {
        self.conn().execute(
            "INSERT INTO users (id, username, email, fullname, password_hash, avatar, \
             cover_image, refresh_token, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                user.id,
                user.username,
                user.email,
                user.fullname,
                user.password_hash,
                user.avatar,
                user.cover_image,
                user.refresh_token,
                format_datetime(&user.created_at),
                format_datetime(&user.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
            params![id],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_user_by_login(&self, identity: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE username = ?1 OR email = ?1"),
            params![identity],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn username_or_email_exists(&self, username: &str, email: &str) -> Result<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1 OR email = ?2",
            params![username, email],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn update_user(&self, user: &User) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE users SET email = ?1, fullname = ?2, avatar = ?3, cover_image = ?4, \
             updated_at = ?5 WHERE id = ?6",
            params![
                user.email,
                user.fullname,
                user.avatar,
                user.cover_image,
                format_datetime(&Utc::now()),
                user.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn update_password(&self, user_id: &str, password_hash: &str) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE users SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
            params![password_hash, format_datetime(&Utc::now()), user_id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn set_refresh_token(&self, user_id: &str, token: Option<&str>) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE users SET refresh_token = ?1, updated_at = ?2 WHERE id = ?3",
            params![token, format_datetime(&Utc::now()), user_id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn swap_refresh_token(&self, user_id: &str, current: &str, next: &str) -> Result<bool> {
        // Zero rows affected means the presented token is no longer the stored
        // one (rotated elsewhere or cleared by logout).
        let rows = self.conn().execute(
            "UPDATE users SET refresh_token = ?1, updated_at = ?2 \
             WHERE id = ?3 AND refresh_token = ?4",
            params![next, format_datetime(&Utc::now()), user_id, current],
        )?;
        Ok(rows > 0)
    }

    // Aggregated user views

    fn get_channel_profile(
        &self,
        username: &str,
        viewer_id: &str,
    ) -> Result<Option<ChannelProfile>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT u.id, u.username, u.email, u.fullname, u.avatar, u.cover_image,
                (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id),
                (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id),
                EXISTS(SELECT 1 FROM subscriptions s
                       WHERE s.channel_id = u.id AND s.subscriber_id = ?2)
             FROM users u WHERE u.username = ?1",
            params![username, viewer_id],
            |row| {
                Ok(ChannelProfile {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    fullname: row.get(3)?,
                    avatar: row.get(4)?,
                    cover_image: row.get(5)?,
                    subscribers_count: row.get(6)?,
                    channels_subscribed_to_count: row.get(7)?,
                    is_subscribed: row.get(8)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_watch_history(&self, user_id: &str) -> Result<Vec<VideoWithOwner>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {VIDEO_COLS}, {OWNER_COLS}
             FROM watch_history w
             JOIN videos v ON v.id = w.video_id
             JOIN users u ON u.id = v.owner_id
             WHERE w.user_id = ?1
             ORDER BY w.rowid"
        ))?;

        let rows = stmt.query_map(params![user_id], video_with_owner_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn add_watch_history(&self, user_id: &str, video_id: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO watch_history (user_id, video_id, watched_at) VALUES (?1, ?2, ?3)",
            params![user_id, video_id, format_datetime(&Utc::now())],
        )?;
        Ok(())
    }

    // Video operations

    fn create_video(&self, video: &Video) -> Result<()> {
        self.conn().execute(
            "INSERT INTO videos (id, owner_id, video_file, thumbnail, title, description, \
             duration, views, is_published, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                video.id,
                video.owner_id,
                video.video_file,
                video.thumbnail,
                video.title,
                video.description,
                video.duration,
                video.views,
                video.is_published,
                format_datetime(&video.created_at),
                format_datetime(&video.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_video(&self, id: &str) -> Result<Option<Video>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {VIDEO_COLS} FROM videos v WHERE v.id = ?1"),
            params![id],
            video_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_video_with_owner(&self, id: &str) -> Result<Option<VideoWithOwner>> {
        let conn = self.conn();
        conn.query_row(
            &format!(
                "SELECT {VIDEO_COLS}, {OWNER_COLS}
                 FROM videos v JOIN users u ON u.id = v.owner_id
                 WHERE v.id = ?1"
            ),
            params![id],
            video_with_owner_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_videos(&self, query: &VideoQuery) -> Result<Page<VideoWithOwner>> {
        let mut clauses = vec!["v.is_published = 1".to_string()];
        let mut values: Vec<Value> = Vec::new();

        if let Some(ref q) = query.query {
            values.push(Value::Text(q.clone()));
            clauses.push(format!("v.title LIKE '%' || ?{} || '%'", values.len()));
        }
        if let Some(ref owner) = query.owner_id {
            values.push(Value::Text(owner.clone()));
            clauses.push(format!("v.owner_id = ?{}", values.len()));
        }

        let where_sql = clauses.join(" AND ");
        let conn = self.conn();

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM videos v WHERE {where_sql}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;

        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let order = format!(
            "{} {}",
            query.sort_by.column(),
            query.sort_direction.keyword()
        );
        // Stable tie-break so paging never repeats or drops rows.
        let tie_break = match query.sort_direction {
            SortDirection::Ascending => "v.id ASC",
            SortDirection::Descending => "v.id DESC",
        };

        let mut stmt = conn.prepare(&format!(
            "SELECT {VIDEO_COLS}, {OWNER_COLS}
             FROM videos v JOIN users u ON u.id = v.owner_id
             WHERE {where_sql}
             ORDER BY {order}, {tie_break}
             LIMIT ?{} OFFSET ?{}",
            values.len() + 1,
            values.len() + 2,
        ))?;

        values.push(Value::Integer(limit));
        values.push(Value::Integer((page - 1) * limit));

        let rows = stmt.query_map(params_from_iter(values.iter()), video_with_owner_from_row)?;
        let items = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, limit, total))
    }

    fn update_video(&self, video: &Video) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE videos SET title = ?1, description = ?2, thumbnail = ?3, updated_at = ?4 \
             WHERE id = ?5 AND owner_id = ?6",
            params![
                video.title,
                video.description,
                video.thumbnail,
                format_datetime(&Utc::now()),
                video.id,
                video.owner_id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_video(&self, id: &str, owner_id: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM videos WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        Ok(rows > 0)
    }

    fn set_video_published(&self, id: &str, owner_id: &str, published: bool) -> Result<bool> {
        let rows = self.conn().execute(
            "UPDATE videos SET is_published = ?1, updated_at = ?2 \
             WHERE id = ?3 AND owner_id = ?4",
            params![published, format_datetime(&Utc::now()), id, owner_id],
        )?;
        Ok(rows > 0)
    }

    fn increment_video_views(&self, id: &str) -> Result<()> {
        self.conn().execute(
            "UPDATE videos SET views = views + 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    // Comment operations

    fn create_comment(&self, comment: &Comment) -> Result<()> {
        self.conn().execute(
            "INSERT INTO comments (id, video_id, owner_id, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                comment.id,
                comment.video_id,
                comment.owner_id,
                comment.content,
                format_datetime(&comment.created_at),
                format_datetime(&comment.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_comment(&self, id: &str) -> Result<Option<Comment>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, video_id, owner_id, content, created_at, updated_at \
             FROM comments WHERE id = ?1",
            params![id],
            comment_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_video_comments(
        &self,
        video_id: &str,
        page: i64,
        limit: i64,
    ) -> Result<Page<CommentWithOwner>> {
        let conn = self.conn();

        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM comments WHERE video_id = ?1",
            params![video_id],
            |row| row.get(0),
        )?;

        let page = page.max(1);
        let limit = limit.max(1);

        let mut stmt = conn.prepare(&format!(
            "SELECT c.id, c.video_id, c.owner_id, c.content, c.created_at, c.updated_at, \
             {OWNER_COLS}
             FROM comments c JOIN users u ON u.id = c.owner_id
             WHERE c.video_id = ?1
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT ?2 OFFSET ?3"
        ))?;

        let rows = stmt.query_map(params![video_id, limit, (page - 1) * limit], |row| {
            Ok(CommentWithOwner {
                comment: comment_from_row(row)?,
                owner: owner_from_row(row, 6)?,
            })
        })?;
        let items = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, limit, total))
    }

    fn update_comment(&self, id: &str, owner_id: &str, content: &str) -> Result<Option<Comment>> {
        let rows = self.conn().execute(
            "UPDATE comments SET content = ?1, updated_at = ?2 WHERE id = ?3 AND owner_id = ?4",
            params![content, format_datetime(&Utc::now()), id, owner_id],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        self.get_comment(id)
    }

    fn delete_comment(&self, id: &str, owner_id: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM comments WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        Ok(rows > 0)
    }

    // Like operations

    fn toggle_like(&self, user_id: &str, target: LikeTarget, target_id: &str) -> Result<Toggle> {
        let conn = self.conn();

        // Delete-first: the unique index on (user_id, target_kind, target_id)
        // turns a concurrent duplicate insert into a constraint violation
        // instead of a second row.
        let deleted = conn.execute(
            "DELETE FROM likes WHERE user_id = ?1 AND target_kind = ?2 AND target_id = ?3",
            params![user_id, target.as_str(), target_id],
        )?;
        if deleted > 0 {
            return Ok(Toggle::Removed);
        }

        conn.execute(
            "INSERT INTO likes (id, user_id, target_kind, target_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (user_id, target_kind, target_id) DO NOTHING",
            params![
                uuid::Uuid::new_v4().to_string(),
                user_id,
                target.as_str(),
                target_id,
                format_datetime(&Utc::now()),
            ],
        )?;
        Ok(Toggle::Added)
    }

    fn list_liked_videos(&self, user_id: &str) -> Result<Vec<VideoWithOwner>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {VIDEO_COLS}, {OWNER_COLS}
             FROM likes l
             JOIN videos v ON v.id = l.target_id
             JOIN users u ON u.id = v.owner_id
             WHERE l.user_id = ?1 AND l.target_kind = 'video'
             ORDER BY l.created_at DESC, l.id DESC"
        ))?;

        let rows = stmt.query_map(params![user_id], video_with_owner_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Subscription operations

    fn toggle_subscription(&self, subscriber_id: &str, channel_id: &str) -> Result<Toggle> {
        let conn = self.conn();

        let deleted = conn.execute(
            "DELETE FROM subscriptions WHERE subscriber_id = ?1 AND channel_id = ?2",
            params![subscriber_id, channel_id],
        )?;
        if deleted > 0 {
            return Ok(Toggle::Removed);
        }

        conn.execute(
            "INSERT INTO subscriptions (id, subscriber_id, channel_id, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (subscriber_id, channel_id) DO NOTHING",
            params![
                uuid::Uuid::new_v4().to_string(),
                subscriber_id,
                channel_id,
                format_datetime(&Utc::now()),
            ],
        )?;
        Ok(Toggle::Added)
    }

    fn list_channel_subscribers(&self, channel_id: &str) -> Result<Vec<UserPublic>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {OWNER_COLS}
             FROM subscriptions s JOIN users u ON u.id = s.subscriber_id
             WHERE s.channel_id = ?1
             ORDER BY s.created_at DESC, s.id DESC"
        ))?;

        let rows = stmt.query_map(params![channel_id], |row| owner_from_row(row, 0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_subscribed_channels(&self, subscriber_id: &str) -> Result<Vec<UserPublic>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {OWNER_COLS}
             FROM subscriptions s JOIN users u ON u.id = s.channel_id
             WHERE s.subscriber_id = ?1
             ORDER BY s.created_at DESC, s.id DESC"
        ))?;

        let rows = stmt.query_map(params![subscriber_id], |row| owner_from_row(row, 0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Playlist operations

    fn create_playlist(&self, playlist: &Playlist) -> Result<()> {
        self.conn().execute(
            "INSERT INTO playlists (id, owner_id, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                playlist.id,
                playlist.owner_id,
                playlist.name,
                playlist.description,
                format_datetime(&playlist.created_at),
                format_datetime(&playlist.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_playlist(&self, id: &str) -> Result<Option<Playlist>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, owner_id, name, description, created_at, updated_at \
             FROM playlists WHERE id = ?1",
            params![id],
            playlist_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_playlist_detail(&self, id: &str) -> Result<Option<PlaylistDetail>> {
        let conn = self.conn();

        let joined = conn
            .query_row(
                &format!(
                    "SELECT p.id, p.owner_id, p.name, p.description, p.created_at, p.updated_at, \
                     {OWNER_COLS}
                     FROM playlists p JOIN users u ON u.id = p.owner_id
                     WHERE p.id = ?1"
                ),
                params![id],
                |row| Ok((playlist_from_row(row)?, owner_from_row(row, 6)?)),
            )
            .optional()?;

        let Some((playlist, owner)) = joined else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
            "SELECT {VIDEO_COLS}
             FROM playlist_videos pv JOIN videos v ON v.id = pv.video_id
             WHERE pv.playlist_id = ?1
             ORDER BY pv.position"
        ))?;
        let rows = stmt.query_map(params![id], video_from_row)?;
        let videos = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(PlaylistDetail {
            playlist,
            owner,
            videos,
        }))
    }

    fn list_user_playlists(&self, owner_id: &str) -> Result<Vec<Playlist>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, name, description, created_at, updated_at \
             FROM playlists WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map(params![owner_id], playlist_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_playlist(
        &self,
        id: &str,
        owner_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Playlist>> {
        let rows = self.conn().execute(
            "UPDATE playlists SET name = ?1, description = ?2, updated_at = ?3 \
             WHERE id = ?4 AND owner_id = ?5",
            params![name, description, format_datetime(&Utc::now()), id, owner_id],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        self.get_playlist(id)
    }

    fn delete_playlist(&self, id: &str, owner_id: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM playlists WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        Ok(rows > 0)
    }

    fn add_playlist_video(&self, playlist_id: &str, video_id: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO playlist_videos (playlist_id, position, video_id)
             SELECT ?1, COALESCE(MAX(position) + 1, 0), ?2
             FROM playlist_videos WHERE playlist_id = ?1",
            params![playlist_id, video_id],
        )?;
        Ok(())
    }

    fn remove_playlist_video(&self, playlist_id: &str, video_id: &str) -> Result<bool> {
        // Removes every occurrence; duplicates are allowed on insert.
        let rows = self.conn().execute(
            "DELETE FROM playlist_videos WHERE playlist_id = ?1 AND video_id = ?2",
            params![playlist_id, video_id],
        )?;
        Ok(rows > 0)
    }
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        video_id: row.get(1)?,
        owner_id: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        updated_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

fn playlist_from_row(row: &Row<'_>) -> rusqlite::Result<Playlist> {
    Ok(Playlist {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        updated_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}
