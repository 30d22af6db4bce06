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
use crate::types::Toggle;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/toggle/{channel_id}", post(toggle_subscription))
        .route("/channel/{channel_id}", get(channel_subscribers))
        .route("/user/{subscriber_id}", get(subscribed_channels))
}

pub async fn toggle_subscription(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
) -> impl IntoResponse {
    let user = auth.0;
    let store = state.store.as_ref();

    validate_id(&channel_id, "channel")?;
    if channel_id == user.id {
        return Err(ApiError::bad_request("Cannot subscribe to yourself"));
    }

    store
        .get_user(&channel_id)
        .api_err("Failed to fetch channel")?
        .or_not_found("Channel not found")?;

    let outcome = store
        .toggle_subscription(&user.id, &channel_id)
        .api_err("Failed to toggle subscription")?;

    let response = match outcome {
        Toggle::Added => {
            ApiResponse::ok(ToggleResponse::added(), "Subscription added successfully")
        }
        Toggle::Removed => ApiResponse::ok(
            ToggleResponse::removed(),
            "Subscription removed successfully",
        ),
    };

    Ok::<_, ApiError>(response)
}

pub async fn channel_subscribers(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    validate_id(&channel_id, "channel")?;

    store
        .get_user(&channel_id)
        .api_err("Failed to fetch channel")?
        .or_not_found("Channel not found")?;

    let subscribers = store
        .list_channel_subscribers(&channel_id)
        .api_err("Failed to fetch subscribers")?;

    Ok::<_, ApiError>(ApiResponse::ok(subscribers, "Subscriber list fetched"))
}

pub async fn subscribed_channels(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(subscriber_id): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    validate_id(&subscriber_id, "subscriber")?;

    store
        .get_user(&subscriber_id)
        .api_err("Failed to fetch user")?
        .or_not_found("User not found")?;

    let channels = store
        .list_subscribed_channels(&subscriber_id)
        .api_err("Failed to fetch subscribed channels")?;

    Ok::<_, ApiError>(ApiResponse::ok(channels, "Subscribed channel list fetched"))
}
