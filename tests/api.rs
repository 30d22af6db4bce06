mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, set_cookies};

#[tokio::test]
async fn register_returns_user_without_secrets() {
    let app = TestApp::new();

    let data = app.register("alice").await;

    assert_eq!(data["username"], "alice");
    assert_eq!(data["email"], "alice@example.com");
    assert!(data.get("password_hash").is_none());
    assert!(data.get("refresh_token").is_none());
}

#[tokio::test]
async fn register_normalizes_username_case() {
    let app = TestApp::new();

    let (status, body, _) = app
        .request(
            "POST",
            "/api/v1/users/register",
            None,
            Some(json!({
                "username": "  MixedCase  ",
                "email": "mixed@example.com",
                "fullname": "Mixed Case",
                "password": "secret-password",
                "avatar": "https://cdn.example.com/a.png",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "mixedcase");
}

#[tokio::test]
async fn register_rejects_duplicate_username_and_email() {
    let app = TestApp::new();
    app.register("alice").await;

    let (status, body, _) = app
        .request(
            "POST",
            "/api/v1/users/register",
            None,
            Some(json!({
                "username": "alice",
                "email": "other@example.com",
                "fullname": "Other Alice",
                "password": "secret-password",
                "avatar": "https://cdn.example.com/a.png",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/register",
            None,
            Some(json!({
                "username": "alice2",
                "email": "alice@example.com",
                "fullname": "Second Alice",
                "password": "secret-password",
                "avatar": "https://cdn.example.com/a.png",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_missing_fields_and_bad_email() {
    let app = TestApp::new();

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/register",
            None,
            Some(json!({
                "username": "bob",
                "email": "bob@example.com",
                "fullname": "",
                "password": "secret",
                "avatar": "https://cdn.example.com/a.png",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/register",
            None,
            Some(json!({
                "username": "bob",
                "email": "not-an-email",
                "fullname": "Bob",
                "password": "secret",
                "avatar": "https://cdn.example.com/a.png",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_returns_tokens_and_sets_cookies() {
    let app = TestApp::new();
    app.register("alice").await;

    let (status, body, headers) = app
        .request(
            "POST",
            "/api/v1/users/login",
            None,
            Some(json!({"username": "alice", "password": "alice-password"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
    assert_eq!(body["data"]["user"]["username"], "alice");

    let cookies = set_cookies(&headers);
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
}

#[tokio::test]
async fn login_by_email_works() {
    let app = TestApp::new();
    app.register("alice").await;

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/login",
            None,
            Some(json!({"email": "alice@example.com", "password": "alice-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user() {
    let app = TestApp::new();
    app.register("alice").await;

    let (status, body, _) = app
        .request(
            "POST",
            "/api/v1/users/login",
            None,
            Some(json!({"username": "alice", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid user credentials");

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/login",
            None,
            Some(json!({"username": "nobody", "password": "whatever"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::new();

    let (status, body, _) = app.request("GET", "/api/v1/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized request");

    let (status, body, _) = app
        .request("GET", "/api/v1/users/me", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid access token");
}

#[tokio::test]
async fn current_user_reflects_the_token() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let (status, body, _) = app
        .request("GET", "/api/v1/users/me", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn refresh_rotates_and_rejects_the_old_token() {
    let app = TestApp::new();
    let (_, refresh) = app.signup("alice").await;

    let (status, body, _) = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            None,
            Some(json!({"refresh_token": refresh})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let rotated = body["data"]["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(rotated, refresh);

    // The pre-rotation token no longer matches the stored value.
    let (status, body, _) = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            None,
            Some(json!({"refresh_token": refresh})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired refresh token");

    // The rotated one still works.
    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            None,
            Some(json!({"refresh_token": rotated})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn refresh_without_a_token_is_rejected() {
    let app = TestApp::new();

    let (status, _, _) = app
        .request("POST", "/api/v1/users/refresh-token", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_the_refresh_token() {
    let app = TestApp::new();
    let (access, refresh) = app.signup("alice").await;

    let (status, _, headers) = app
        .request("POST", "/api/v1/users/logout", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Cookies are cleared on the way out.
    let cookies = set_cookies(&headers);
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/refresh-token",
            None,
            Some(json!({"refresh_token": refresh})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_requires_the_old_one() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/change-password",
            Some(&access),
            Some(json!({"old_password": "wrong", "new_password": "brand-new"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/change-password",
            Some(&access),
            Some(json!({"old_password": "alice-password", "new_password": "brand-new"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/users/login",
            None,
            Some(json!({"username": "alice", "password": "brand-new"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn account_updates_are_reflected() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let (status, body, _) = app
        .request(
            "PATCH",
            "/api/v1/users/me",
            Some(&access),
            Some(json!({"fullname": "Alice Prime"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fullname"], "Alice Prime");

    let (status, body, _) = app
        .request(
            "PATCH",
            "/api/v1/users/avatar",
            Some(&access),
            Some(json!({"avatar": "https://cdn.example.com/new.png"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["avatar"], "https://cdn.example.com/new.png");

    let (_, body, _) = app
        .request("GET", "/api/v1/users/me", Some(&access), None)
        .await;
    assert_eq!(body["data"]["fullname"], "Alice Prime");
}

#[tokio::test]
async fn publish_and_fetch_video_counts_views() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let video = app.publish_video(&access, "First video").await;
    assert_eq!(video["views"], 0);
    assert_eq!(video["is_published"], true);
    let id = video["id"].as_str().unwrap();

    let (status, body, _) = app
        .request("GET", &format!("/api/v1/videos/{id}"), Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["views"], 1);
    assert_eq!(body["data"]["owner"]["username"], "alice");
    assert!(body["data"]["owner"].get("email").is_none());

    let (_, body, _) = app
        .request("GET", &format!("/api/v1/videos/{id}"), Some(&access), None)
        .await;
    assert_eq!(body["data"]["views"], 2);
}

#[tokio::test]
async fn watch_history_records_every_view_in_order() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let first = app.publish_video(&access, "First").await;
    let second = app.publish_video(&access, "Second").await;
    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();

    for id in [first_id, second_id, first_id] {
        app.request("GET", &format!("/api/v1/videos/{id}"), Some(&access), None)
            .await;
    }

    let (status, body, _) = app
        .request("GET", "/api/v1/users/watch-history", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0]["id"], first_id);
    assert_eq!(history[1]["id"], second_id);
    assert_eq!(history[2]["id"], first_id);
}

#[tokio::test]
async fn unpublished_videos_are_owner_only() {
    let app = TestApp::new();
    let (owner, _) = app.signup("alice").await;
    let (other, _) = app.signup("bob").await;

    let video = app.publish_video(&owner, "Secret video").await;
    let id = video["id"].as_str().unwrap();

    let (status, body, _) = app
        .request(
            "PATCH",
            &format!("/api/v1/videos/{id}/toggle-publish"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_published"], false);

    let (status, _, _) = app
        .request("GET", &format!("/api/v1/videos/{id}"), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .request("GET", &format!("/api/v1/videos/{id}"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn video_list_filters_sorts_and_paginates() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    app.publish_video(&access, "Rust lifetimes").await;
    app.publish_video(&access, "Rust traits").await;
    app.publish_video(&access, "Gardening basics").await;

    let (status, body, _) = app
        .request(
            "GET",
            "/api/v1/videos?query=rust&sort_by=title&sort_dir=asc",
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 2);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items[0]["title"], "Rust lifetimes");
    assert_eq!(items[1]["title"], "Rust traits");

    let (status, body, _) = app
        .request("GET", "/api/v1/videos?page=2&limit=2", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["limit"], 2);
    assert_eq!(body["data"]["total_items"], 3);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn video_list_rejects_unknown_sort_fields() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let (status, _, _) = app
        .request(
            "GET",
            "/api/v1/videos?sort_by=password_hash",
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .request("GET", "/api/v1/videos?sort_dir=sideways", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn video_mutations_are_owner_only() {
    let app = TestApp::new();
    let (owner, _) = app.signup("alice").await;
    let (other, _) = app.signup("bob").await;

    let video = app.publish_video(&owner, "Mine").await;
    let id = video["id"].as_str().unwrap();

    let (status, _, _) = app
        .request(
            "PATCH",
            &format!("/api/v1/videos/{id}"),
            Some(&other),
            Some(json!({"title": "Stolen"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .request("DELETE", &format!("/api/v1/videos/{id}"), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body, _) = app
        .request(
            "PATCH",
            &format!("/api/v1/videos/{id}"),
            Some(&owner),
            Some(json!({"title": "Renamed"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Renamed");

    let (status, _, _) = app
        .request("DELETE", &format!("/api/v1/videos/{id}"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = app
        .request("GET", &format!("/api/v1/videos/{id}"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comments_crud_and_pagination() {
    let app = TestApp::new();
    let (alice, _) = app.signup("alice").await;
    let (bob, _) = app.signup("bob").await;

    let video = app.publish_video(&alice, "Commented video").await;
    let video_id = video["id"].as_str().unwrap();

    let (status, body, _) = app
        .request(
            "POST",
            &format!("/api/v1/videos/{video_id}/comments"),
            Some(&bob),
            Some(json!({"content": "Nice one"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let comment_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body, _) = app
        .request(
            "GET",
            &format!("/api/v1/videos/{video_id}/comments"),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["items"][0]["content"], "Nice one");
    assert_eq!(body["data"]["items"][0]["owner"]["username"], "bob");

    // Only the author may edit or delete.
    let (status, _, _) = app
        .request(
            "PATCH",
            &format!("/api/v1/comments/{comment_id}"),
            Some(&alice),
            Some(json!({"content": "Edited by someone else"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body, _) = app
        .request(
            "PATCH",
            &format!("/api/v1/comments/{comment_id}"),
            Some(&bob),
            Some(json!({"content": "Even nicer"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["content"], "Even nicer");

    let (status, _, _) = app
        .request(
            "DELETE",
            &format!("/api/v1/comments/{comment_id}"),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .request(
            "DELETE",
            &format!("/api/v1/comments/{comment_id}"),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn comments_on_a_missing_video_are_404() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;
    let missing = uuid::Uuid::new_v4();

    let (status, _, _) = app
        .request(
            "GET",
            &format!("/api/v1/videos/{missing}/comments"),
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn commentless_video_returns_an_empty_page() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let video = app.publish_video(&access, "Quiet video").await;
    let id = video["id"].as_str().unwrap();

    let (status, body, _) = app
        .request(
            "GET",
            &format!("/api/v1/videos/{id}/comments"),
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 0);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn like_toggle_flips_on_repeat() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let video = app.publish_video(&access, "Likeable").await;
    let id = video["id"].as_str().unwrap();

    let (status, body, _) = app
        .request(
            "POST",
            &format!("/api/v1/likes/toggle/video/{id}"),
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["toggled"], "added");

    let (_, body, _) = app
        .request(
            "POST",
            &format!("/api/v1/likes/toggle/video/{id}"),
            Some(&access),
            None,
        )
        .await;
    assert_eq!(body["data"]["toggled"], "removed");

    let (_, body, _) = app
        .request(
            "POST",
            &format!("/api/v1/likes/toggle/video/{id}"),
            Some(&access),
            None,
        )
        .await;
    assert_eq!(body["data"]["toggled"], "added");
}

#[tokio::test]
async fn like_rejects_unknown_kinds_and_missing_targets() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;
    let missing = uuid::Uuid::new_v4();

    let (status, _, _) = app
        .request(
            "POST",
            &format!("/api/v1/likes/toggle/podcast/{missing}"),
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .request(
            "POST",
            &format!("/api/v1/likes/toggle/video/{missing}"),
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn liked_videos_lists_only_video_likes() {
    let app = TestApp::new();
    let (alice, _) = app.signup("alice").await;
    let (bob, _) = app.signup("bob").await;

    let video = app.publish_video(&alice, "Popular").await;
    let video_id = video["id"].as_str().unwrap();

    let (_, body, _) = app
        .request(
            "POST",
            &format!("/api/v1/videos/{video_id}/comments"),
            Some(&alice),
            Some(json!({"content": "First"})),
        )
        .await;
    let comment_id = body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        &format!("/api/v1/likes/toggle/video/{video_id}"),
        Some(&bob),
        None,
    )
    .await;
    app.request(
        "POST",
        &format!("/api/v1/likes/toggle/comment/{comment_id}"),
        Some(&bob),
        None,
    )
    .await;

    let (status, body, _) = app
        .request("GET", "/api/v1/likes/videos", Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let liked = body["data"].as_array().unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0]["id"], video_id);
    assert_eq!(liked[0]["owner"]["username"], "alice");
}

#[tokio::test]
async fn subscription_toggle_updates_both_lists() {
    let app = TestApp::new();
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let alice_id = alice["id"].as_str().unwrap();
    let bob_id = bob["id"].as_str().unwrap();
    let (bob_token, _) = app.login("bob").await;

    let (status, body, _) = app
        .request(
            "POST",
            &format!("/api/v1/subscriptions/toggle/{alice_id}"),
            Some(&bob_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["toggled"], "added");

    let (_, body, _) = app
        .request(
            "GET",
            &format!("/api/v1/subscriptions/channel/{alice_id}"),
            Some(&bob_token),
            None,
        )
        .await;
    let subscribers = body["data"].as_array().unwrap();
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0]["username"], "bob");

    let (_, body, _) = app
        .request(
            "GET",
            &format!("/api/v1/subscriptions/user/{bob_id}"),
            Some(&bob_token),
            None,
        )
        .await;
    let channels = body["data"].as_array().unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0]["username"], "alice");

    // Toggling again removes the subscription everywhere.
    let (_, body, _) = app
        .request(
            "POST",
            &format!("/api/v1/subscriptions/toggle/{alice_id}"),
            Some(&bob_token),
            None,
        )
        .await;
    assert_eq!(body["data"]["toggled"], "removed");

    let (_, body, _) = app
        .request(
            "GET",
            &format!("/api/v1/subscriptions/channel/{alice_id}"),
            Some(&bob_token),
            None,
        )
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn self_subscription_is_rejected() {
    let app = TestApp::new();
    let alice = app.register("alice").await;
    let alice_id = alice["id"].as_str().unwrap();
    let (token, _) = app.login("alice").await;

    let (status, body, _) = app
        .request(
            "POST",
            &format!("/api/v1/subscriptions/toggle/{alice_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot subscribe to yourself");
}

#[tokio::test]
async fn channel_profile_reports_counts_and_viewer_state() {
    let app = TestApp::new();
    let alice = app.register("alice").await;
    let alice_id = alice["id"].as_str().unwrap();
    app.register("bob").await;
    app.register("carol").await;
    let (bob_token, _) = app.login("bob").await;
    let (carol_token, _) = app.login("carol").await;

    app.request(
        "POST",
        &format!("/api/v1/subscriptions/toggle/{alice_id}"),
        Some(&bob_token),
        None,
    )
    .await;
    app.request(
        "POST",
        &format!("/api/v1/subscriptions/toggle/{alice_id}"),
        Some(&carol_token),
        None,
    )
    .await;

    let (status, body, _) = app
        .request(
            "GET",
            "/api/v1/users/channel/alice",
            Some(&bob_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subscribers_count"], 2);
    assert_eq!(body["data"]["channels_subscribed_to_count"], 0);
    assert_eq!(body["data"]["is_subscribed"], true);

    let (alice_token, _) = app.login("alice").await;
    let (_, body, _) = app
        .request(
            "GET",
            "/api/v1/users/channel/alice",
            Some(&alice_token),
            None,
        )
        .await;
    assert_eq!(body["data"]["is_subscribed"], false);

    let (status, _, _) = app
        .request(
            "GET",
            "/api/v1/users/channel/nobody",
            Some(&bob_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn playlist_crud_round_trip() {
    let app = TestApp::new();
    let alice = app.register("alice").await;
    let alice_id = alice["id"].as_str().unwrap();
    let (token, _) = app.login("alice").await;

    let (status, body, _) = app
        .request(
            "POST",
            "/api/v1/playlists",
            Some(&token),
            Some(json!({"name": "Favorites", "description": "The good stuff"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body, _) = app
        .request(
            "GET",
            &format!("/api/v1/playlists/user/{alice_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body, _) = app
        .request(
            "PATCH",
            &format!("/api/v1/playlists/{playlist_id}"),
            Some(&token),
            Some(json!({"name": "Renamed", "description": "Still good"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Renamed");

    let (status, _, _) = app
        .request(
            "DELETE",
            &format!("/api/v1/playlists/{playlist_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = app
        .request(
            "GET",
            &format!("/api/v1/playlists/{playlist_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn playlist_videos_keep_insertion_order() {
    let app = TestApp::new();
    let (token, _) = app.signup("alice").await;

    let (_, body, _) = app
        .request(
            "POST",
            "/api/v1/playlists",
            Some(&token),
            Some(json!({"name": "Watch later"})),
        )
        .await;
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();

    let first = app.publish_video(&token, "First").await;
    let second = app.publish_video(&token, "Second").await;
    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();

    for video_id in [second_id, first_id] {
        let (status, _, _) = app
            .request(
                "POST",
                &format!("/api/v1/playlists/{playlist_id}/videos/{video_id}"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body, _) = app
        .request(
            "GET",
            &format!("/api/v1/playlists/{playlist_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["owner"]["username"], "alice");
    let videos = body["data"]["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["id"], second_id);
    assert_eq!(videos[1]["id"], first_id);

    let (status, _, _) = app
        .request(
            "DELETE",
            &format!("/api/v1/playlists/{playlist_id}/videos/{second_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body, _) = app
        .request(
            "GET",
            &format!("/api/v1/playlists/{playlist_id}"),
            Some(&token),
            None,
        )
        .await;
    let videos = body["data"]["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["id"], first_id);

    // Removing a video that is not in the playlist is a 404.
    let (status, _, _) = app
        .request(
            "DELETE",
            &format!("/api/v1/playlists/{playlist_id}/videos/{second_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn playlist_mutations_are_owner_only() {
    let app = TestApp::new();
    let (alice, _) = app.signup("alice").await;
    let (bob, _) = app.signup("bob").await;

    let (_, body, _) = app
        .request(
            "POST",
            "/api/v1/playlists",
            Some(&alice),
            Some(json!({"name": "Private"})),
        )
        .await;
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();
    let video = app.publish_video(&alice, "A video").await;
    let video_id = video["id"].as_str().unwrap();

    let (status, _, _) = app
        .request(
            "PATCH",
            &format!("/api/v1/playlists/{playlist_id}"),
            Some(&bob),
            Some(json!({"name": "Hijacked", "description": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .request(
            "POST",
            &format!("/api/v1/playlists/{playlist_id}/videos/{video_id}"),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .request(
            "DELETE",
            &format!("/api/v1/playlists/{playlist_id}"),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_ids_are_bad_requests() {
    let app = TestApp::new();
    let (access, _) = app.signup("alice").await;

    let (status, body, _) = app
        .request("GET", "/api/v1/videos/not-a-uuid", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid video ID");

    let (status, _, _) = app
        .request(
            "POST",
            "/api/v1/subscriptions/toggle/not-a-uuid",
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_check_is_open() {
    let app = TestApp::new();

    let (status, _, _) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
