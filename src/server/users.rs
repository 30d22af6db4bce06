use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::cookies::{REFRESH_TOKEN_COOKIE, clear_auth_cookies, set_auth_cookies};
use crate::server::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RefreshRequest, RegisterRequest,
    UpdateAccountRequest, UpdateAvatarRequest, UpdateCoverImageRequest,
};
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::{normalize_username, require_fields, validate_email};
use crate::types::User;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh-token", post(refresh_token))
        .route("/change-password", post(change_password))
        .route("/me", get(current_user))
        .route("/me", patch(update_account))
        .route("/avatar", patch(update_avatar))
        .route("/cover-image", patch(update_cover_image))
        .route("/channel/{username}", get(channel_profile))
        .route("/watch-history", get(watch_history))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    require_fields(&[
        ("fullname", &req.fullname),
        ("email", &req.email),
        ("username", &req.username),
        ("password", &req.password),
        ("avatar", &req.avatar),
    ])?;

    let username = normalize_username(&req.username)?;
    validate_email(&req.email)?;
    let email = req.email.trim().to_lowercase();

    if store
        .username_or_email_exists(&username, &email)
        .api_err("Failed to check existing users")?
    {
        return Err(ApiError::conflict(
            "User with email or username already exists",
        ));
    }

    let password_hash =
        crate::auth::hash_password(&req.password).api_err("Failed to hash password")?;

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        username,
        email,
        fullname: req.fullname.trim().to_string(),
        password_hash,
        avatar: req.avatar,
        cover_image: req.cover_image.filter(|c| !c.trim().is_empty()),
        refresh_token: None,
        created_at: now,
        updated_at: now,
    };

    store.create_user(&user).api_err("Failed to create user")?;

    Ok::<_, ApiError>(ApiResponse::created(user, "User registered successfully"))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let identity = req
        .username
        .as_deref()
        .or(req.email.as_deref())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("username or email is required"))?;
    require_fields(&[("password", &req.password)])?;

    let user = store
        .get_user_by_login(&identity)
        .api_err("Failed to look up user")?
        .ok_or_else(|| ApiError::unauthorized("Invalid user credentials"))?;

    let valid = crate::auth::verify_password(&req.password, &user.password_hash)
        .api_err("Failed to verify password")?;
    if !valid {
        return Err(ApiError::unauthorized("Invalid user credentials"));
    }

    let tokens = state.tokens.issue_pair(&user).api_err("Failed to issue tokens")?;
    store
        .set_refresh_token(&user.id, Some(&tokens.refresh_token))
        .api_err("Failed to persist refresh token")?;

    let jar = set_auth_cookies(jar, &tokens, state.auth.refresh_ttl_days);
    let body = AuthResponse { user, tokens };

    Ok::<_, ApiError>((jar, ApiResponse::ok(body, "User logged in successfully")))
}

pub async fn logout(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> impl IntoResponse {
    let user = auth.0;

    // Clearing the stored value makes every outstanding refresh token for
    // this user unusable until the next login.
    state
        .store
        .set_refresh_token(&user.id, None)
        .api_err("Failed to clear refresh token")?;

    let jar = clear_auth_cookies(jar);

    Ok::<_, ApiError>((
        jar,
        ApiResponse::ok(serde_json::json!({}), "User logged out"),
    ))
}

pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> impl IntoResponse {
    const STALE: &str = "Invalid or expired refresh token";
    let store = state.store.as_ref();

    let presented = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| body.and_then(|Json(b)| b.refresh_token))
        .ok_or_else(|| ApiError::unauthorized("Refresh token is required"))?;

    // Signature/expiry failure, a missing user, and a stored-value mismatch
    // are deliberately indistinguishable to the caller.
    let claims = state
        .tokens
        .decode_refresh_token(&presented)
        .map_err(|_| ApiError::unauthorized(STALE))?;

    let user = store
        .get_user(&claims.sub)
        .api_err("Failed to look up user")?
        .ok_or_else(|| ApiError::unauthorized(STALE))?;

    let tokens = state.tokens.issue_pair(&user).api_err("Failed to issue tokens")?;

    let rotated = store
        .swap_refresh_token(&user.id, &presented, &tokens.refresh_token)
        .api_err("Failed to rotate refresh token")?;
    if !rotated {
        return Err(ApiError::unauthorized(STALE));
    }

    let jar = set_auth_cookies(jar, &tokens, state.auth.refresh_ttl_days);
    let body = AuthResponse { user, tokens };

    Ok::<_, ApiError>((jar, ApiResponse::ok(body, "Access token refreshed")))
}

pub async fn change_password(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    let user = auth.0;

    require_fields(&[
        ("old_password", &req.old_password),
        ("new_password", &req.new_password),
    ])?;

    let valid = crate::auth::verify_password(&req.old_password, &user.password_hash)
        .api_err("Failed to verify password")?;
    if !valid {
        return Err(ApiError::unauthorized("Old password is incorrect"));
    }

    let password_hash =
        crate::auth::hash_password(&req.new_password).api_err("Failed to hash password")?;
    state
        .store
        .update_password(&user.id, &password_hash)
        .api_err("Failed to update password")?;

    Ok::<_, ApiError>(ApiResponse::ok(
        serde_json::json!({}),
        "Password changed successfully",
    ))
}

pub async fn current_user(auth: RequireUser) -> impl IntoResponse {
    ApiResponse::ok(auth.0, "Current user fetched")
}

pub async fn update_account(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    let mut user = auth.0;

    if req.fullname.is_none() && req.email.is_none() {
        return Err(ApiError::bad_request("fullname or email is required"));
    }

    if let Some(fullname) = req.fullname {
        require_fields(&[("fullname", &fullname)])?;
        user.fullname = fullname.trim().to_string();
    }
    if let Some(email) = req.email {
        validate_email(&email)?;
        user.email = email.trim().to_lowercase();
    }

    state
        .store
        .update_user(&user)
        .api_err("Failed to update account")?;

    Ok::<_, ApiError>(ApiResponse::ok(user, "Account details updated"))
}

pub async fn update_avatar(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateAvatarRequest>,
) -> impl IntoResponse {
    let mut user = auth.0;

    require_fields(&[("avatar", &req.avatar)])?;
    user.avatar = req.avatar;

    state
        .store
        .update_user(&user)
        .api_err("Failed to update avatar")?;

    Ok::<_, ApiError>(ApiResponse::ok(user, "Avatar updated"))
}

pub async fn update_cover_image(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateCoverImageRequest>,
) -> impl IntoResponse {
    let mut user = auth.0;

    require_fields(&[("cover_image", &req.cover_image)])?;
    user.cover_image = Some(req.cover_image);

    state
        .store
        .update_user(&user)
        .api_err("Failed to update cover image")?;

    Ok::<_, ApiError>(ApiResponse::ok(user, "Cover image updated"))
}

pub async fn channel_profile(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    let viewer = auth.0;
    let username = username.trim().to_lowercase();

    if username.is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }

    let profile = state
        .store
        .get_channel_profile(&username, &viewer.id)
        .api_err("Failed to fetch channel profile")?
        .or_not_found("Channel not found")?;

    Ok::<_, ApiError>(ApiResponse::ok(profile, "Channel profile fetched"))
}

pub async fn watch_history(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let user = auth.0;

    let history = state
        .store
        .get_watch_history(&user.id)
        .api_err("Failed to fetch watch history")?;

    Ok::<_, ApiError>(ApiResponse::ok(history, "Watch history fetched"))
}
